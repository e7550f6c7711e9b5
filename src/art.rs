//! ArtMap: an adaptive radix tree keyed by `i64`, iterating ascending.
//!
//! Keys descend byte-at-a-time, most significant byte first, through branch
//! nodes whose fanout adapts to occupancy (4-way, 16-way, 256-way). Keeping
//! sibling keys packed in one node makes intra-node search and insertion
//! cache-friendly, which suits a book whose updates cluster near the top.
//!
//! Signed keys are biased into unsigned space before radix decomposition so
//! negative keys (the negated bid prices of
//! [`ArtBook`](crate::ArtBook)) sort before positive ones.
//!
//! Traversal takes a real visitor predicate: it stops as soon as the visitor
//! declines, in addition to honoring a caller-supplied ceiling on emitted
//! entries.
//!
//! An optional pooling mode recycles freed nodes through per-kind freelists,
//! trading a fixed memory footprint for a near-zero steady-state allocation
//! rate.

/// Number of key bytes; leaves sit below the last branch level.
const KEY_BYTES: usize = 8;

const SIGN_BIT: u64 = 1 << 63;

#[inline]
fn biased(key: i64) -> u64 {
    (key as u64) ^ SIGN_BIT
}

#[inline]
fn unbias(raw: u64) -> i64 {
    (raw ^ SIGN_BIT) as i64
}

type Slot = Option<Box<Node>>;

enum Node {
    Leaf(i64),
    N4 {
        len: u8,
        keys: [u8; 4],
        children: [Slot; 4],
    },
    N16 {
        len: u8,
        keys: [u8; 16],
        children: [Slot; 16],
    },
    N256 {
        len: u16,
        children: Box<[Slot; 256]>,
    },
}

impl Node {
    fn empty_n4() -> Node {
        Node::N4 {
            len: 0,
            keys: [0; 4],
            children: [const { None }; 4],
        }
    }

    fn empty_n16() -> Node {
        Node::N16 {
            len: 0,
            keys: [0; 16],
            children: [const { None }; 16],
        }
    }

    fn empty_n256() -> Node {
        Node::N256 {
            len: 0,
            children: Box::new([const { None }; 256]),
        }
    }

    fn find_child(&self, byte: u8) -> Option<&Node> {
        match self {
            Node::Leaf(_) => None,
            Node::N4 { len, keys, children } => keys[..*len as usize]
                .binary_search(&byte)
                .ok()
                .and_then(|i| children[i].as_deref()),
            Node::N16 { len, keys, children } => keys[..*len as usize]
                .binary_search(&byte)
                .ok()
                .and_then(|i| children[i].as_deref()),
            Node::N256 { children, .. } => children[byte as usize].as_deref(),
        }
    }

    /// Mutable slot for an existing child edge.
    fn child_slot_mut(&mut self, byte: u8) -> Option<&mut Slot> {
        match self {
            Node::Leaf(_) => None,
            Node::N4 { len, keys, children } => keys[..*len as usize]
                .binary_search(&byte)
                .ok()
                .map(|i| &mut children[i]),
            Node::N16 { len, keys, children } => keys[..*len as usize]
                .binary_search(&byte)
                .ok()
                .map(|i| &mut children[i]),
            Node::N256 { children, .. } => {
                let slot = &mut children[byte as usize];
                slot.is_some().then_some(slot)
            }
        }
    }

    fn has_child(&self, byte: u8) -> bool {
        self.find_child(byte).is_some()
    }

    fn is_full(&self) -> bool {
        match self {
            Node::Leaf(_) => true,
            Node::N4 { len, .. } => *len == 4,
            Node::N16 { len, .. } => *len == 16,
            Node::N256 { .. } => false,
        }
    }

    fn child_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::N4 { len, .. } => *len as usize,
            Node::N16 { len, .. } => *len as usize,
            Node::N256 { len, .. } => *len as usize,
        }
    }

    /// Insert a new (empty) slot for `byte`, keeping sibling keys sorted.
    ///
    /// The node must not already hold `byte` and must not be full.
    fn insert_slot(&mut self, byte: u8) -> &mut Slot {
        match self {
            Node::N4 { len, keys, children } => {
                let n = *len as usize;
                let pos = keys[..n].binary_search(&byte).unwrap_err();
                for j in (pos..n).rev() {
                    keys[j + 1] = keys[j];
                    children[j + 1] = children[j].take();
                }
                keys[pos] = byte;
                *len += 1;
                &mut children[pos]
            }
            Node::N16 { len, keys, children } => {
                let n = *len as usize;
                let pos = keys[..n].binary_search(&byte).unwrap_err();
                for j in (pos..n).rev() {
                    keys[j + 1] = keys[j];
                    children[j + 1] = children[j].take();
                }
                keys[pos] = byte;
                *len += 1;
                &mut children[pos]
            }
            Node::N256 { len, children } => {
                *len += 1;
                &mut children[byte as usize]
            }
            Node::Leaf(_) => unreachable!("leaf has no children"),
        }
    }

    /// Drop the (already emptied) slot for `byte`.
    fn remove_slot(&mut self, byte: u8) {
        match self {
            Node::N4 { len, keys, children } => {
                let n = *len as usize;
                if let Ok(pos) = keys[..n].binary_search(&byte) {
                    for j in pos..n - 1 {
                        keys[j] = keys[j + 1];
                        children[j] = children[j + 1].take();
                    }
                    children[n - 1] = None;
                    *len -= 1;
                }
            }
            Node::N16 { len, keys, children } => {
                let n = *len as usize;
                if let Ok(pos) = keys[..n].binary_search(&byte) {
                    for j in pos..n - 1 {
                        keys[j] = keys[j + 1];
                        children[j] = children[j + 1].take();
                    }
                    children[n - 1] = None;
                    *len -= 1;
                }
            }
            Node::N256 { len, children } => {
                children[byte as usize] = None;
                *len -= 1;
            }
            Node::Leaf(_) => {}
        }
    }
}

/// Per-kind freelists for recycled nodes.
///
/// Disabled pools drop freed nodes; enabled pools keep up to `cap` of each
/// kind and hand them back on the next allocation.
struct Pool {
    enabled: bool,
    cap: usize,
    leaves: Vec<Box<Node>>,
    n4: Vec<Box<Node>>,
    n16: Vec<Box<Node>>,
    n256: Vec<Box<Node>>,
}

impl Pool {
    fn disabled() -> Self {
        Pool {
            enabled: false,
            cap: 0,
            leaves: Vec::new(),
            n4: Vec::new(),
            n16: Vec::new(),
            n256: Vec::new(),
        }
    }

    fn enabled(cap: usize) -> Self {
        Pool {
            enabled: true,
            cap,
            leaves: Vec::with_capacity(cap.min(4096)),
            n4: Vec::with_capacity(cap.min(4096)),
            n16: Vec::new(),
            n256: Vec::new(),
        }
    }

    fn alloc_leaf(&mut self, value: i64) -> Box<Node> {
        match self.leaves.pop() {
            Some(mut node) => {
                *node = Node::Leaf(value);
                node
            }
            None => Box::new(Node::Leaf(value)),
        }
    }

    fn alloc_n4(&mut self) -> Box<Node> {
        self.n4.pop().unwrap_or_else(|| Box::new(Node::empty_n4()))
    }

    fn alloc_n16(&mut self) -> Box<Node> {
        self.n16.pop().unwrap_or_else(|| Box::new(Node::empty_n16()))
    }

    fn alloc_n256(&mut self) -> Box<Node> {
        self.n256
            .pop()
            .unwrap_or_else(|| Box::new(Node::empty_n256()))
    }

    /// Recycle a node whose children have already been detached.
    fn free(&mut self, mut node: Box<Node>) {
        if !self.enabled {
            return;
        }
        let list = match node.as_mut() {
            Node::Leaf(_) => &mut self.leaves,
            Node::N4 { len, .. } => {
                *len = 0;
                &mut self.n4
            }
            Node::N16 { len, .. } => {
                *len = 0;
                &mut self.n16
            }
            Node::N256 { len, .. } => {
                *len = 0;
                &mut self.n256
            }
        };
        if list.len() < self.cap {
            list.push(node);
        }
    }
}

/// Ordered `i64 -> i64` map with adaptive radix branching.
pub struct ArtMap {
    root: Slot,
    len: usize,
    pool: Pool,
}

impl ArtMap {
    /// A map that allocates and frees nodes directly.
    pub fn new() -> Self {
        ArtMap {
            root: None,
            len: 0,
            pool: Pool::disabled(),
        }
    }

    /// A map that recycles freed nodes through freelists holding up to
    /// `pool_capacity` nodes of each kind.
    pub fn pooled(pool_capacity: usize) -> Self {
        ArtMap {
            root: None,
            len: 0,
            pool: Pool::enabled(pool_capacity),
        }
    }

    /// Number of keys present.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Point lookup.
    pub fn get(&self, key: i64) -> Option<i64> {
        let bytes = biased(key).to_be_bytes();
        let mut node = self.root.as_deref()?;
        for byte in bytes {
            node = node.find_child(byte)?;
        }
        match node {
            Node::Leaf(value) => Some(*value),
            _ => None,
        }
    }

    /// Insert or overwrite `key`.
    pub fn insert(&mut self, key: i64, value: i64) {
        let bytes = biased(key).to_be_bytes();
        if insert_rec(&mut self.root, &bytes, 0, value, &mut self.pool) {
            self.len += 1;
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: i64) -> Option<i64> {
        let bytes = biased(key).to_be_bytes();
        let removed = remove_rec(&mut self.root, &bytes, 0, &mut self.pool);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Visit entries in ascending key order.
    ///
    /// Stops when `visit` returns `false`, when `limit` entries have been
    /// emitted, or when the map is exhausted — whichever comes first.
    pub fn for_each_while(&self, limit: usize, visit: &mut dyn FnMut(i64, i64) -> bool) {
        if let Some(root) = self.root.as_deref() {
            let mut emitted = 0;
            walk(root, 0, limit, &mut emitted, visit);
        }
    }

    /// Remove every entry. Freed nodes go back to the pool when pooling is
    /// enabled.
    pub fn clear(&mut self) {
        if let Some(root) = self.root.take() {
            free_tree(root, &mut self.pool);
        }
        self.len = 0;
    }
}

impl Default for ArtMap {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns true when the key was not previously present.
fn insert_rec(slot: &mut Slot, bytes: &[u8; KEY_BYTES], depth: usize, value: i64, pool: &mut Pool) -> bool {
    if depth == KEY_BYTES {
        return match slot {
            Some(node) => {
                **node = Node::Leaf(value);
                false
            }
            None => {
                *slot = Some(pool.alloc_leaf(value));
                true
            }
        };
    }

    let node = slot.get_or_insert_with(|| pool.alloc_n4());

    let byte = bytes[depth];
    if !node.has_child(byte) && node.is_full() {
        promote(node, pool);
    }
    let child = match node.child_slot_mut(byte) {
        Some(child) => child,
        None => node.insert_slot(byte),
    };
    insert_rec(child, bytes, depth + 1, value, pool)
}

/// Replace a full node with the next-larger kind, moving its children over.
fn promote(node: &mut Box<Node>, pool: &mut Pool) {
    let mut bigger = match node.as_ref() {
        Node::N4 { .. } => pool.alloc_n16(),
        Node::N16 { .. } => pool.alloc_n256(),
        _ => return,
    };
    match node.as_mut() {
        Node::N4 { len, keys, children } => {
            for i in 0..*len as usize {
                *bigger.insert_slot(keys[i]) = children[i].take();
            }
            *len = 0;
        }
        Node::N16 { len, keys, children } => {
            for i in 0..*len as usize {
                *bigger.insert_slot(keys[i]) = children[i].take();
            }
            *len = 0;
        }
        _ => return,
    }
    let old = std::mem::replace(node, bigger);
    pool.free(old);
}

fn remove_rec(slot: &mut Slot, bytes: &[u8; KEY_BYTES], depth: usize, pool: &mut Pool) -> Option<i64> {
    if depth == KEY_BYTES {
        let node = slot.take()?;
        if let Node::Leaf(value) = *node {
            pool.free(node);
            return Some(value);
        }
        *slot = Some(node);
        return None;
    }

    let node = slot.as_mut()?;
    let byte = bytes[depth];
    let child = node.child_slot_mut(byte)?;
    let removed = remove_rec(child, bytes, depth + 1, pool)?;

    if child.is_none() {
        node.remove_slot(byte);
    }
    if node.child_count() == 0 {
        if let Some(empty) = slot.take() {
            pool.free(empty);
        }
    }
    Some(removed)
}

/// Ascending walk; returns false once the visitor or the limit stops it.
fn walk(
    node: &Node,
    prefix: u64,
    limit: usize,
    emitted: &mut usize,
    visit: &mut dyn FnMut(i64, i64) -> bool,
) -> bool {
    match node {
        Node::Leaf(value) => {
            if *emitted >= limit {
                return false;
            }
            *emitted += 1;
            visit(unbias(prefix), *value)
        }
        Node::N4 { len, keys, children } => {
            for i in 0..*len as usize {
                if let Some(child) = children[i].as_deref() {
                    if !walk(child, (prefix << 8) | keys[i] as u64, limit, emitted, visit) {
                        return false;
                    }
                }
            }
            true
        }
        Node::N16 { len, keys, children } => {
            for i in 0..*len as usize {
                if let Some(child) = children[i].as_deref() {
                    if !walk(child, (prefix << 8) | keys[i] as u64, limit, emitted, visit) {
                        return false;
                    }
                }
            }
            true
        }
        Node::N256 { children, .. } => {
            for (byte, slot) in children.iter().enumerate() {
                if let Some(child) = slot.as_deref() {
                    if !walk(child, (prefix << 8) | byte as u64, limit, emitted, visit) {
                        return false;
                    }
                }
            }
            true
        }
    }
}

fn free_tree(mut node: Box<Node>, pool: &mut Pool) {
    match node.as_mut() {
        Node::Leaf(_) => {}
        Node::N4 { len, children, .. } => {
            for i in 0..*len as usize {
                if let Some(child) = children[i].take() {
                    free_tree(child, pool);
                }
            }
        }
        Node::N16 { len, children, .. } => {
            for i in 0..*len as usize {
                if let Some(child) = children[i].take() {
                    free_tree(child, pool);
                }
            }
        }
        Node::N256 { children, .. } => {
            for slot in children.iter_mut() {
                if let Some(child) = slot.take() {
                    free_tree(child, pool);
                }
            }
        }
    }
    pool.free(node);
}
