//! Character trie keyed by token spelling.
//!
//! Every token table of an [`Environment`](crate::Environment) is a
//! [`SymbolTrie`]. The compiler never splits the input into words up front;
//! it walks the trie character by character from the current scan position
//! and keeps the deepest node that carries a binding. That is what lets
//! `sinh` win over `sin`, `<=` over `<` and `log2` over `log` without any
//! ordering rules in the tables themselves.
//!
//! # Example
//!
//! ```
//! use relplot_expr::SymbolTrie;
//!
//! let mut trie = SymbolTrie::new();
//! assert!(trie.insert("sin", 1));
//! assert!(trie.insert("sinh", 2));
//! assert!(!trie.insert("sin", 3));
//!
//! assert_eq!(trie.longest_match("sinh(x)", 0), Some((4, &2)));
//! assert_eq!(trie.longest_match("sin(x)", 0), Some((3, &1)));
//! ```

use std::collections::BTreeMap;

/// A single node of a [`SymbolTrie`].
///
/// A node is reached by spelling a prefix from the root. It is *bound* when
/// some complete name ends here.
#[derive(Debug, Clone)]
pub struct TrieNode<V> {
    children: BTreeMap<char, TrieNode<V>>,
    value: Option<V>,
}

impl<V> TrieNode<V> {
    fn empty() -> Self {
        Self {
            children: BTreeMap::new(),
            value: None,
        }
    }

    /// Binding stored at this node, if a complete name ends here.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    /// Whether a complete name ends at this node.
    pub fn is_bound(&self) -> bool {
        self.value.is_some()
    }

    /// Child reached by one more character.
    pub fn child(&self, ch: char) -> Option<&TrieNode<V>> {
        self.children.get(&ch)
    }

    fn is_prunable(&self) -> bool {
        self.value.is_none() && self.children.is_empty()
    }
}

/// Map from token spelling to payload with longest-match lookup.
///
/// Lookup cost is proportional to the length of the token, not to the
/// number of bindings.
#[derive(Debug, Clone)]
pub struct SymbolTrie<V> {
    root: TrieNode<V>,
    len: usize,
}

impl<V> Default for SymbolTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> SymbolTrie<V> {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self {
            root: TrieNode::empty(),
            len: 0,
        }
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no name is bound.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bind `name` to `value`.
    ///
    /// Returns `false` and leaves the trie untouched when `name` is already
    /// bound. The empty name is never bound.
    pub fn insert(&mut self, name: &str, value: V) -> bool {
        if name.is_empty() || self.get(name).is_some() {
            return false;
        }
        let mut node = &mut self.root;
        for ch in name.chars() {
            node = node.children.entry(ch).or_insert_with(TrieNode::empty);
        }
        node.value = Some(value);
        self.len += 1;
        true
    }

    /// Node reached by spelling all of `name`, bound or not.
    pub fn search(&self, name: &str) -> Option<&TrieNode<V>> {
        name.chars()
            .try_fold(&self.root, |node, ch| node.children.get(&ch))
    }

    /// Binding for exactly `name`.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.search(name).and_then(TrieNode::value)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Cursor positioned at the root, for character-by-character walks.
    pub fn cursor(&self) -> TrieCursor<'_, V> {
        TrieCursor { node: &self.root }
    }

    /// Longest bound name that `text` spells starting at byte `start`.
    ///
    /// Returns the byte offset just past the match together with the binding.
    /// Prefixes that are not themselves bound are walked through but never
    /// returned, so `lo` in a trie holding only `log` yields `None`.
    pub fn longest_match(&self, text: &str, start: usize) -> Option<(usize, &V)> {
        let rest = text.get(start..)?;
        let mut cursor = self.cursor();
        let mut best = None;
        for (offset, ch) in rest.char_indices() {
            match cursor.find(ch) {
                Some(next) => cursor = next,
                None => break,
            }
            if let Some(value) = cursor.value() {
                best = Some((start + offset + ch.len_utf8(), value));
            }
        }
        best
    }

    /// Remove the binding for `name`.
    ///
    /// Branches left without bindings are pruned back to the nearest node
    /// that still has another child or its own binding. Returns `false` when
    /// `name` was not bound.
    pub fn erase(&mut self, name: &str) -> bool {
        let chars: Vec<char> = name.chars().collect();
        let removed = Self::erase_from(&mut self.root, &chars);
        if removed {
            self.len -= 1;
        }
        removed
    }

    fn erase_from(node: &mut TrieNode<V>, rest: &[char]) -> bool {
        let Some((first, tail)) = rest.split_first() else {
            return node.value.take().is_some();
        };
        let Some(child) = node.children.get_mut(first) else {
            return false;
        };
        let removed = Self::erase_from(child, tail);
        if removed && child.is_prunable() {
            node.children.remove(first);
        }
        removed
    }

    /// All bound names in lexicographic order of their characters.
    pub fn names(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len);
        let mut prefix = String::new();
        Self::collect_names(&self.root, &mut prefix, &mut out);
        out
    }

    fn collect_names(node: &TrieNode<V>, prefix: &mut String, out: &mut Vec<String>) {
        if node.value.is_some() {
            out.push(prefix.clone());
        }
        for (ch, child) in &node.children {
            prefix.push(*ch);
            Self::collect_names(child, prefix, out);
            prefix.pop();
        }
    }
}

/// Position inside a [`SymbolTrie`] during a manual walk.
#[derive(Debug)]
pub struct TrieCursor<'a, V> {
    node: &'a TrieNode<V>,
}

impl<V> Clone for TrieCursor<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for TrieCursor<'_, V> {}

impl<'a, V> TrieCursor<'a, V> {
    /// Step one character further, or `None` if no name continues with `ch`.
    pub fn find(self, ch: char) -> Option<TrieCursor<'a, V>> {
        self.node.child(ch).map(|node| TrieCursor { node })
    }

    /// Binding completed at the current position.
    pub fn value(&self) -> Option<&'a V> {
        self.node.value()
    }

    /// Node under the cursor.
    pub fn node(&self) -> &'a TrieNode<V> {
        self.node
    }
}
