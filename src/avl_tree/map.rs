use crate::avl_tree::node::Node;
use crate::avl_tree::{tree, Error, Result};
use crate::entry::Entry;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using an AVL tree.
///
/// An AVL tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one. Every mutating operation
/// rebalances the path it touched, so the height of the tree stays logarithmic in the number of
/// entries. Keys are unique; inserting a key twice is an error.
///
/// # Examples
///
/// ```
/// use balanced_collections::avl_tree::{AvlMap, Error};
///
/// let mut map = AvlMap::new();
/// map.insert(0, 1).unwrap();
/// map.insert(3, 4).unwrap();
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Ok(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// assert_eq!(map.insert(3, 5), Err(Error::DuplicateKey));
/// assert_eq!(map.remove(&0), Some((0, 1)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct AvlMap<T, U> {
    tree: tree::Tree<T, U>,
}

impl<T, U> AvlMap<T, U> {
    /// Constructs a new, empty `AvlMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// ```
    pub fn new() -> Self {
        AvlMap { tree: None }
    }

    /// Inserts a key-value pair into the map. Inserting a key that is already present leaves the
    /// map untouched and signals [`Error::DuplicateKey`](enum.Error.html).
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::{AvlMap, Error};
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.insert(1, 1), Ok(()));
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Err(Error::DuplicateKey));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Result<()>
    where
        T: Ord,
    {
        tree::insert(&mut self.tree, Node::new(key, value))
    }

    /// Removes a key-value pair from the map, returning it if the key was present. Removing a key
    /// that is not in the map is a no-op and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::remove(&mut self.tree, key).map(|entry| {
            let Entry { key, value } = entry;
            (key, value)
        })
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key, or `None` if
    /// the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get(&self.tree, key).map(|entry| &entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key, or `None` if
    /// the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::get_mut(&mut self.tree, key).map(|entry| &mut entry.value)
    }

    /// Returns the number of entries in the map. The count is obtained by walking the whole tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        tree::count(&self.tree)
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let map: AvlMap<u32, u32> = AvlMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree = None;
    }

    /// Returns the height of the tree. An empty map has height 0 and a map with a single entry
    /// has height 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.height(), 0);
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.height(), 2);
    /// ```
    pub fn height(&self) -> usize {
        tree::height(&self.tree)
    }

    /// Verifies that the heights of the two child subtrees of every node differ by at most one.
    /// The check recomputes all heights instead of trusting the cached ones, so it can serve as a
    /// consistency oracle.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in 0..100 {
    ///     map.insert(key, key).unwrap();
    /// }
    /// assert!(map.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        tree::is_balanced(&self.tree)
    }

    /// Returns a key in the map that is less than or equal to a particular key, or `None` if such
    /// a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::floor(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key, or `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::ceil(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns the largest key in the map that is strictly less than a particular key, or `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.predecessor(&1), None);
    /// assert_eq!(map.predecessor(&3), Some(&1));
    /// assert_eq!(map.predecessor(&10), Some(&3));
    /// ```
    pub fn predecessor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::predecessor(&self.tree, key).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the map, or [`Error::EmptyTree`](enum.Error.html) if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::{AvlMap, Error};
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyTree));
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T> {
        tree::min(&self.tree)
            .map(|entry| &entry.key)
            .ok_or(Error::EmptyTree)
    }

    /// Returns the maximum key of the map, or [`Error::EmptyTree`](enum.Error.html) if the map is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::{AvlMap, Error};
    ///
    /// let mut map = AvlMap::new();
    /// assert_eq!(map.max(), Err(Error::EmptyTree));
    /// map.insert(1, 1).unwrap();
    /// map.insert(3, 3).unwrap();
    /// assert_eq!(map.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&T> {
        tree::max(&self.tree)
            .map(|entry| &entry.key)
            .ok_or(Error::EmptyTree)
    }

    /// Visits every entry of the map in reverse in-order, so the keys are produced in strictly
    /// descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in 1..6 {
    ///     map.insert(key, key).unwrap();
    /// }
    ///
    /// let mut keys = Vec::new();
    /// map.for_each_rev(|key, _| keys.push(*key));
    /// assert_eq!(keys, vec![5, 4, 3, 2, 1]);
    /// ```
    pub fn for_each_rev<F>(&self, mut visit: F)
    where
        F: FnMut(&T, &U),
    {
        tree::for_each_rev(&self.tree, &mut visit);
    }

    /// Returns all keys in the closed interval `[min, max]` in ascending order. Subtrees that lie
    /// entirely outside the interval are pruned from the traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// for key in &[10, 20, 30, 40, 50] {
    ///     map.insert(*key, ()).unwrap();
    /// }
    ///
    /// assert_eq!(map.keys_in_range(&15, &45), vec![&20, &30, &40]);
    /// ```
    pub fn keys_in_range<V>(&self, min: &V, max: &V) -> Vec<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut keys = Vec::new();
        tree::keys_in_range(&self.tree, min, max, &mut keys);
        keys
    }

    /// Returns `true` if the node structure of `other` occurs rooted at some node of this map.
    /// Two nodes match when their keys are equal and their left and right subtrees match
    /// recursively, including absent children; associated values are ignored. Every node of this
    /// map is tried as a candidate root.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(2, "b").unwrap();
    /// map.insert(1, "a").unwrap();
    /// map.insert(3, "c").unwrap();
    ///
    /// let mut single = AvlMap::new();
    /// single.insert(1, ()).unwrap();
    /// assert!(map.is_subtree(&single));
    ///
    /// let mut missing = AvlMap::new();
    /// missing.insert(4, ()).unwrap();
    /// assert!(!map.is_subtree(&missing));
    /// ```
    pub fn is_subtree<V>(&self, other: &AvlMap<T, V>) -> bool
    where
        T: Ord,
    {
        tree::is_subtree(&self.tree, &other.tree)
    }

    /// Renders the map as one line per node of the form `<prefix><R|L>----<key>`, where `R` and
    /// `L` mark whether the node is its parent's right or left child; the root counts as `R`.
    /// Children are listed beneath their parent, left before right, indented one level deeper.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(2, 'b').unwrap();
    /// map.insert(1, 'a').unwrap();
    /// map.insert(3, 'c').unwrap();
    ///
    /// assert_eq!(map.render(), "R----2\n   L----1\n   R----3\n");
    /// ```
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        let mut out = String::new();
        tree::render(&self.tree, &mut out);
        out
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlMapIter<T, U> {
        AvlMapIter {
            current: &self.tree,
            stack: Vec::new(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlMap;
    ///
    /// let mut map = AvlMap::new();
    /// map.insert(1, 1).unwrap();
    /// map.insert(2, 2).unwrap();
    ///
    /// for (_, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> AvlMapIterMut<T, U> {
        AvlMapIterMut {
            current: self.tree.as_mut().map(|node| &mut **node),
            stack: Vec::new(),
        }
    }
}

impl<T, U> IntoIterator for AvlMap<T, U> {
    type IntoIter = AvlMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a AvlMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = AvlMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U> IntoIterator for &'a mut AvlMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = AvlMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct AvlMapIntoIter<T, U> {
    current: tree::Tree<T, U>,
    stack: Vec<Node<T, U>>,
}

impl<T, U> Iterator for AvlMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node {
                entry: Entry { key, value },
                right,
                ..
            } = node;
            self.current = right;
            (key, value)
        })
    }
}

/// An iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    current: &'a tree::Tree<T, U>,
    stack: Vec<&'a Node<T, U>>,
}

impl<'a, T, U> Iterator for AvlMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            (&node.entry.key, &node.entry.value)
        })
    }
}

/// A mutable iterator for `AvlMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references.
pub struct AvlMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    current: Option<&'a mut Node<T, U>>,
    stack: Vec<(&'a mut Entry<T, U>, Option<&'a mut Node<T, U>>)>,
}

impl<'a, T, U> Iterator for AvlMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current.take() {
            let Node {
                ref mut entry,
                ref mut left,
                ref mut right,
                ..
            } = *node;
            self.current = left.as_mut().map(|node| &mut **node);
            self.stack.push((entry, right.as_mut().map(|node| &mut **node)));
        }
        self.stack.pop().map(|(entry, right)| {
            self.current = right;
            let Entry {
                ref key,
                ref mut value,
            } = *entry;
            (key, value)
        })
    }
}

impl<T, U> Clone for AvlMap<T, U>
where
    T: Clone,
    U: Clone,
{
    /// Produces a deep, fully independent copy of the map with the same keys, values, and node
    /// structure. Mutating the copy never affects the original and vice versa.
    fn clone(&self) -> Self {
        AvlMap {
            tree: tree::clone(&self.tree),
        }
    }
}

impl<T, U> Default for AvlMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> fmt::Debug for AvlMap<T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq for AvlMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &AvlMap<T, U>) -> bool {
        self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for AvlMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<'a, T, U, V> Index<&'a V> for AvlMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for AvlMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<T, U> Serialize for AvlMap<T, U>
where
    T: Serialize,
    U: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for entry in self.iter() {
            seq.serialize_element(&entry)?;
        }
        seq.end()
    }
}

impl<'de, T, U> Deserialize<'de> for AvlMap<T, U>
where
    T: Ord + Deserialize<'de>,
    U: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeqVisitor<T, U> {
            marker: PhantomData<AvlMap<T, U>>,
        }

        impl<'de, T, U> Visitor<'de> for SeqVisitor<T, U>
        where
            T: Ord + Deserialize<'de>,
            U: Deserialize<'de>,
        {
            type Value = AvlMap<T, U>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of key-value pairs with unique keys")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut map = AvlMap::new();
                while let Some((key, value)) = seq.next_element()? {
                    map.insert(key, value).map_err(de::Error::custom)?;
                }
                Ok(map)
            }
        }

        deserializer.deserialize_seq(SeqVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AvlMap;
    use crate::avl_tree::Error;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_len_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert!(map.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let map: AvlMap<u32, u32> = AvlMap::new();
        assert_eq!(map.min(), Err(Error::EmptyTree));
        assert_eq!(map.max(), Err(Error::EmptyTree));
    }

    #[test]
    fn test_insert() {
        let mut map = AvlMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert!(map.contains_key(&1));
        assert_eq!(map.get(&1), Some(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut map = AvlMap::new();
        assert_eq!(map.insert(1, 1), Ok(()));
        assert_eq!(map.insert(1, 3), Err(Error::DuplicateKey));
        assert_eq!(map.get(&1), Some(&1));
        assert_eq!(map.len(), 1);
        assert!(map.is_balanced());
    }

    #[test]
    fn test_remove() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert!(!map.contains_key(&1));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut map = AvlMap::new();
        for key in &[4, 2, 6, 1, 3, 5, 7] {
            map.insert(*key, *key).unwrap();
        }
        let render = map.render();
        let height = map.height();

        assert_eq!(map.remove(&100), None);

        assert_eq!(map.render(), render);
        assert_eq!(map.height(), height);
        assert_eq!(map.len(), 7);
    }

    #[test]
    fn test_remove_leaf_rebalances() {
        let mut map = AvlMap::new();
        for key in 1..5 {
            map.insert(key, key).unwrap();
        }
        // 2 -> (1, 3 -> (_, 4)); removing 1 forces a left rotation at the root
        assert_eq!(map.remove(&1), Some((1, 1)));
        assert_eq!(map.render(), "R----3\n   L----2\n   R----4\n");
        assert!(map.is_balanced());
    }

    #[test]
    fn test_remove_one_child() {
        let mut map = AvlMap::new();
        map.insert(2, 20).unwrap();
        map.insert(1, 10).unwrap();
        assert_eq!(map.remove(&2), Some((2, 20)));
        assert_eq!(map.render(), "R----1\n");
        assert_eq!(map.height(), 1);
    }

    #[test]
    fn test_remove_two_children_promotes_successor() {
        let mut map = AvlMap::new();
        for key in 1..8 {
            map.insert(key, key).unwrap();
        }
        // perfectly balanced: 4 -> (2 -> (1, 3), 6 -> (5, 7))
        assert_eq!(map.remove(&4), Some((4, 4)));
        assert_eq!(
            map.render(),
            "R----5\n   L----2\n   |  L----1\n   |  R----3\n   R----6\n      R----7\n",
        );
        assert!(map.is_balanced());
        assert_eq!(map.height(), 3);
        assert_eq!(
            map.iter().map(|pair| *pair.0).collect::<Vec<u32>>(),
            vec![1, 2, 3, 5, 6, 7],
        );
    }

    #[test]
    fn test_rotations_converge() {
        let insert_orders: [[u32; 3]; 4] = [[3, 2, 1], [1, 2, 3], [3, 1, 2], [1, 3, 2]];
        for order in &insert_orders {
            let mut map = AvlMap::new();
            for key in order {
                map.insert(*key, ()).unwrap();
            }
            assert_eq!(map.render(), "R----2\n   L----1\n   R----3\n");
            assert_eq!(map.height(), 2);
            assert!(map.is_balanced());
        }
    }

    #[test]
    fn test_get_mut() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        {
            let value = map.get_mut(&1);
            *value.unwrap() = 3;
        }
        assert_eq!(map.get(&1), Some(&3));
    }

    #[test]
    fn test_min_max() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.min(), Ok(&1));
        assert_eq!(map.max(), Ok(&5));
    }

    #[test]
    fn test_floor_ceil() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.floor(&0), None);
        assert_eq!(map.floor(&2), Some(&1));
        assert_eq!(map.floor(&4), Some(&3));
        assert_eq!(map.floor(&6), Some(&5));

        assert_eq!(map.ceil(&0), Some(&1));
        assert_eq!(map.ceil(&2), Some(&3));
        assert_eq!(map.ceil(&4), Some(&5));
        assert_eq!(map.ceil(&6), None);
    }

    #[test]
    fn test_predecessor() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        map.insert(3, 3).unwrap();
        map.insert(5, 5).unwrap();

        assert_eq!(map.predecessor(&1), None);
        assert_eq!(map.predecessor(&3), Some(&1));
        assert_eq!(map.predecessor(&4), Some(&3));
        assert_eq!(map.predecessor(&100), Some(&5));
    }

    #[test]
    fn test_for_each_rev() {
        let mut map = AvlMap::new();
        for key in 1..6 {
            map.insert(key, key).unwrap();
        }

        let mut keys = Vec::new();
        map.for_each_rev(|key, _| keys.push(*key));
        assert_eq!(keys, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_keys_in_range() {
        let mut map = AvlMap::new();
        for key in &[10, 20, 30, 40, 50] {
            map.insert(*key, ()).unwrap();
        }

        assert_eq!(map.keys_in_range(&15, &45), vec![&20, &30, &40]);
        assert_eq!(map.keys_in_range(&10, &50), vec![&10, &20, &30, &40, &50]);
        assert_eq!(map.keys_in_range(&51, &60), Vec::<&u32>::new());
        assert_eq!(map.keys_in_range(&45, &15), Vec::<&u32>::new());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = AvlMap::new();
        for key in 0..10 {
            map.insert(key, key * 10).unwrap();
        }

        let mut copy = map.clone();
        assert_eq!(copy, map);
        assert_eq!(copy.render(), map.render());

        copy.remove(&3);
        copy.insert(100, 1000).unwrap();
        assert_eq!(map.get(&3), Some(&30));
        assert_eq!(map.get(&100), None);
        assert_eq!(map.len(), 10);
        assert!(copy.is_balanced());

        map.remove(&5);
        assert_eq!(copy.get(&5), Some(&50));
    }

    #[test]
    fn test_is_subtree() {
        let mut map = AvlMap::new();
        for key in 1..8 {
            map.insert(key, key).unwrap();
        }
        // 4 -> (2 -> (1, 3), 6 -> (5, 7))

        let mut inner = AvlMap::new();
        inner.insert(2, ()).unwrap();
        inner.insert(1, ()).unwrap();
        inner.insert(3, ()).unwrap();
        assert!(map.is_subtree(&inner));

        let empty: AvlMap<u32, ()> = AvlMap::new();
        assert!(map.is_subtree(&empty));

        let mut missing = AvlMap::new();
        missing.insert(8, ()).unwrap();
        assert!(!map.is_subtree(&missing));
    }

    #[test]
    fn test_is_subtree_shape_sensitive() {
        let mut map = AvlMap::new();
        map.insert(2, ()).unwrap();
        map.insert(1, ()).unwrap();
        map.insert(3, ()).unwrap();

        // the key exists, but as an interior node with children
        let mut single = AvlMap::new();
        single.insert(2, ()).unwrap();
        assert!(!map.is_subtree(&single));

        // same keys, different shape
        let mut lopsided = AvlMap::new();
        lopsided.insert(1, ()).unwrap();
        lopsided.insert(2, ()).unwrap();
        assert!(!map.is_subtree(&lopsided));
    }

    #[test]
    fn test_render() {
        let mut map = AvlMap::new();
        assert_eq!(map.render(), "");
        for key in 1..8 {
            map.insert(key, key).unwrap();
        }
        assert_eq!(
            map.render(),
            "R----4\n   L----2\n   |  L----1\n   |  R----3\n   R----6\n      L----5\n      R----7\n",
        );
    }

    #[test]
    fn test_index() {
        let mut map = AvlMap::new();
        map.insert(1, 1).unwrap();
        map[&1] = 3;
        assert_eq!(map[&1], 3);
    }

    #[test]
    fn test_into_iter() {
        let mut map = AvlMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(
            map.into_iter().collect::<Vec<(u32, u32)>>(),
            vec![(1, 2), (3, 4), (5, 6)],
        );
    }

    #[test]
    fn test_iter() {
        let mut map = AvlMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &2), (&3, &4), (&5, &6)],
        );
    }

    #[test]
    fn test_iter_mut() {
        let mut map = AvlMap::new();
        map.insert(1, 2).unwrap();
        map.insert(5, 6).unwrap();
        map.insert(3, 4).unwrap();

        for (_, value) in &mut map {
            *value += 1;
        }

        assert_eq!(
            map.iter().collect::<Vec<(&u32, &u32)>>(),
            vec![(&1, &3), (&3, &5), (&5, &7)],
        );
    }

    #[test]
    fn test_serde() {
        let mut map = AvlMap::new();
        map.insert(1, 10).unwrap();
        map.insert(2, 20).unwrap();

        assert_tokens(
            &map,
            &[
                Token::Seq { len: Some(2) },
                Token::Tuple { len: 2 },
                Token::I32(1),
                Token::I32(10),
                Token::TupleEnd,
                Token::Tuple { len: 2 },
                Token::I32(2),
                Token::I32(20),
                Token::TupleEnd,
                Token::SeqEnd,
            ],
        );
    }
}
