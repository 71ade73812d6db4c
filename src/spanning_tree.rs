//! A depth-first spanning forest and the rings its non-tree edges close.

use bit_set::BitSet;
use tracing::trace;

use crate::graph::EdgeTable;

const NIL: usize = usize::MAX;

#[derive(Debug, Clone)]
pub struct SpanningTree {
    edges: EdgeTable,
    tree: BitSet,
    parent: Vec<usize>,
    depth: Vec<usize>,
    component: Vec<usize>,
    components: usize,
    basic_rings: Vec<Vec<usize>>,
}

impl SpanningTree {
    pub fn new(graph: &[Vec<usize>]) -> Self {
        let n = graph.len();
        let edges = EdgeTable::new(graph);
        let mut tree = BitSet::with_capacity(edges.len());
        let mut parent = vec![NIL; n];
        let mut depth = vec![0; n];
        let mut component = vec![NIL; n];
        let mut components = 0;

        // (vertex, next neighbour to look at)
        let mut stack: Vec<(usize, usize)> = Vec::new();
        for root in 0..n {
            if component[root] != NIL {
                continue;
            }
            component[root] = components;
            stack.push((root, 0));
            while let Some((v, next)) = stack.last_mut() {
                let v = *v;
                let Some(&w) = graph[v].get(*next) else {
                    stack.pop();
                    continue;
                };
                *next += 1;
                if w >= n || component[w] != NIL {
                    continue;
                }
                component[w] = components;
                parent[w] = v;
                depth[w] = depth[v] + 1;
                if let Some(e) = edges.index_of(v, w) {
                    tree.insert(e);
                }
                stack.push((w, 0));
            }
            components += 1;
        }

        let mut spanning = Self {
            edges,
            tree,
            parent,
            depth,
            component,
            components,
            basic_rings: Vec::new(),
        };
        spanning.basic_rings = (0..spanning.edges.len())
            .filter(|e| !spanning.tree.contains(*e))
            .filter_map(|e| spanning.edges.edge(e))
            .map(|edge| {
                let (u, v) = edge.endpoints();
                let mut ring = spanning.path(u, v);
                ring.push(u);
                ring
            })
            .collect();
        trace!(components, rings = spanning.basic_rings.len(), "spanning tree");
        spanning
    }

    pub fn is_disconnected(&self) -> bool {
        self.components > 1
    }

    pub fn number_of_components(&self) -> usize {
        self.components
    }

    /// Number of tree edges.
    pub fn spanning_tree_size(&self) -> usize {
        self.tree.len()
    }

    /// Tree edges as vertex pairs, lower vertex first.
    pub fn tree_edges(&self) -> Vec<(usize, usize)> {
        self.tree
            .iter()
            .filter_map(|e| self.edges.edge(e))
            .map(|edge| edge.endpoints())
            .collect()
    }

    /// Edge indices lying on at least one basic ring.
    fn cyclic_edges(&self) -> BitSet {
        let mut cyclic = BitSet::with_capacity(self.edges.len());
        for ring in &self.basic_rings {
            cyclic.union_with(&self.edges.to_edge_vector(ring));
        }
        cyclic
    }

    pub fn bonds_cyclic_count(&self) -> usize {
        self.cyclic_edges().len()
    }

    pub fn bonds_acyclic_count(&self) -> usize {
        self.edges.len() - self.bonds_cyclic_count()
    }

    /// Vertices and edges of the union of all basic rings.
    pub fn cyclic_fragments_container(&self) -> (Vec<usize>, Vec<(usize, usize)>) {
        let mut vertices = BitSet::new();
        let edges: Vec<_> = self
            .cyclic_edges()
            .iter()
            .filter_map(|e| self.edges.edge(e))
            .map(|edge| {
                let (u, v) = edge.endpoints();
                vertices.insert(u);
                vertices.insert(v);
                (u, v)
            })
            .collect();
        (vertices.iter().collect(), edges)
    }

    /// One ring per non-tree edge `u-v`: the tree path from `u` to `v`
    /// closed back to `u`.
    pub fn basic_rings(&self) -> Vec<Vec<usize>> {
        self.basic_rings.clone()
    }

    /// The basic rings and every sum of two basic rings sharing an edge that
    /// is itself a single simple ring.
    pub fn all_rings(&self) -> Vec<Vec<usize>> {
        let vectors: Vec<BitSet> = self.basic_rings.iter().map(|r| self.edges.to_edge_vector(r)).collect();
        let mut seen: Vec<BitSet> = vectors.clone();
        let mut rings = self.basic_rings.clone();
        for i in 0..vectors.len() {
            for j in i + 1..vectors.len() {
                if vectors[i].is_disjoint(&vectors[j]) {
                    continue;
                }
                let mut sum = vectors[i].clone();
                sum.symmetric_difference_with(&vectors[j]);
                if seen.contains(&sum) {
                    continue;
                }
                if let Some(ring) = self.edges.to_path(&sum) {
                    rings.push(ring);
                    seen.push(sum);
                }
            }
        }
        rings
    }

    /// The tree path from `a` to `b`, both included. Empty when the two are
    /// in different components or either is not a vertex.
    pub fn path(&self, a: usize, b: usize) -> Vec<usize> {
        let n = self.parent.len();
        if a >= n || b >= n || self.component[a] != self.component[b] {
            return Vec::new();
        }
        let (mut x, mut y) = (a, b);
        let mut head = Vec::new();
        let mut tail = Vec::new();
        while self.depth[x] > self.depth[y] {
            head.push(x);
            x = self.parent[x];
        }
        while self.depth[y] > self.depth[x] {
            tail.push(y);
            y = self.parent[y];
        }
        while x != y {
            head.push(x);
            tail.push(y);
            x = self.parent[x];
            y = self.parent[y];
        }
        head.push(x);
        head.extend(tail.into_iter().rev());
        head
    }
}
