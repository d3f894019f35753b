use crate::avl_tree::map::{AvlMap, AvlMapIntoIter, AvlMapIter};
use crate::avl_tree::Result;
use serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// An ordered set implemented using an AVL tree.
///
/// An AVL tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one.
///
/// # Examples
///
/// ```
/// use balanced_collections::avl_tree::{AvlSet, Error};
///
/// let mut set = AvlSet::new();
/// set.insert(0).unwrap();
/// set.insert(3).unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.insert(3), Err(Error::DuplicateKey));
///
/// assert_eq!(set.min(), Ok(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct AvlSet<T> {
    map: AvlMap<T, ()>,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        AvlSet { map: AvlMap::new() }
    }

    /// Inserts a key into the set. Inserting a key that is already present leaves the set
    /// untouched and signals [`Error::DuplicateKey`](enum.Error.html).
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::{AvlSet, Error};
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.insert(1), Ok(()));
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Err(Error::DuplicateKey));
    /// ```
    pub fn insert(&mut self, key: T) -> Result<()> {
        self.map.insert(key, ())
    }

    /// Removes a key from the set, returning it if it was present. Removing a key that is not in
    /// the set is a no-op and returns `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T> {
        self.map.remove(key).map(|pair| pair.0)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.map.contains_key(key)
    }

    /// Returns the number of keys in the set. The count is obtained by walking the whole tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the set, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the height of the tree backing the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.height(), 0);
    /// set.insert(1).unwrap();
    /// assert_eq!(set.height(), 1);
    /// ```
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Verifies that the heights of the two child subtrees of every node differ by at most one,
    /// recomputing all heights from scratch.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// for key in 0..100 {
    ///     set.insert(key).unwrap();
    /// }
    /// assert!(set.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        self.map.is_balanced()
    }

    /// Returns a key in the set that is less than or equal to a particular key, or `None` if such
    /// a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor(&self, key: &T) -> Option<&T> {
        self.map.floor(key)
    }

    /// Returns a key in the set that is greater than or equal to a particular key, or `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil(&self, key: &T) -> Option<&T> {
        self.map.ceil(key)
    }

    /// Returns the largest key in the set that is strictly less than a particular key, or `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.predecessor(&1), None);
    /// assert_eq!(set.predecessor(&3), Some(&1));
    /// ```
    pub fn predecessor(&self, key: &T) -> Option<&T> {
        self.map.predecessor(key)
    }

    /// Returns the minimum key of the set, or [`Error::EmptyTree`](enum.Error.html) if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::{AvlSet, Error};
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.min(), Err(Error::EmptyTree));
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&T> {
        self.map.min()
    }

    /// Returns the maximum key of the set, or [`Error::EmptyTree`](enum.Error.html) if the set is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::{AvlSet, Error};
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.max(), Err(Error::EmptyTree));
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    /// assert_eq!(set.max(), Ok(&3));
    /// ```
    pub fn max(&self) -> Result<&T> {
        self.map.max()
    }

    /// Visits every key of the set in reverse in-order, so the keys are produced in strictly
    /// descending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// for key in 1..4 {
    ///     set.insert(key).unwrap();
    /// }
    ///
    /// let mut keys = Vec::new();
    /// set.for_each_rev(|key| keys.push(*key));
    /// assert_eq!(keys, vec![3, 2, 1]);
    /// ```
    pub fn for_each_rev<F>(&self, mut visit: F)
    where
        F: FnMut(&T),
    {
        self.map.for_each_rev(|key, _| visit(key));
    }

    /// Returns all keys in the closed interval `[min, max]` in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// for key in &[10, 20, 30, 40, 50] {
    ///     set.insert(*key).unwrap();
    /// }
    ///
    /// assert_eq!(set.keys_in_range(&15, &45), vec![&20, &30, &40]);
    /// ```
    pub fn keys_in_range(&self, min: &T, max: &T) -> Vec<&T> {
        self.map.keys_in_range(min, max)
    }

    /// Returns `true` if the node structure of `other` occurs rooted at some node of this set.
    /// Two nodes match when their keys are equal and their left and right subtrees match
    /// recursively, including absent children.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(2).unwrap();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// let mut single = AvlSet::new();
    /// single.insert(1).unwrap();
    /// assert!(set.is_subtree(&single));
    /// ```
    pub fn is_subtree(&self, other: &AvlSet<T>) -> bool {
        self.map.is_subtree(&other.map)
    }

    /// Renders the set as one line per node of the form `<prefix><R|L>----<key>`, where `R` and
    /// `L` mark whether the node is its parent's right or left child; the root counts as `R`.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(2).unwrap();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// assert_eq!(set.render(), "R----2\n   L----1\n   R----3\n");
    /// ```
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        self.map.render()
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1).unwrap();
    /// set.insert(3).unwrap();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<T> {
        AvlSetIter {
            map_iter: self.map.iter(),
        }
    }
}

impl<T> IntoIterator for AvlSet<T>
where
    T: Ord,
{
    type IntoIter = AvlSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a + Ord,
{
    type IntoIter = AvlSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct AvlSetIntoIter<T> {
    map_iter: AvlMapIntoIter<T, ()>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    map_iter: AvlMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

impl<T> Default for AvlSet<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AvlSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set()
            .entries(self.map.iter().map(|pair| pair.0))
            .finish()
    }
}

impl<T> PartialEq for AvlSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.map == other.map
    }
}

impl<T> Eq for AvlSet<T> where T: Eq {}

impl<T> Serialize for AvlSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.map.len()))?;
        for (key, _) in self.map.iter() {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

impl<'de, T> Deserialize<'de> for AvlSet<T>
where
    T: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct SeqVisitor<T> {
            marker: PhantomData<AvlSet<T>>,
        }

        impl<'de, T> Visitor<'de> for SeqVisitor<T>
        where
            T: Ord + Deserialize<'de>,
        {
            type Value = AvlSet<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of unique keys")
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut set = AvlSet::new();
                while let Some(key) = seq.next_element()? {
                    set.insert(key).map_err(de::Error::custom)?;
                }
                Ok(set)
            }
        }

        deserializer.deserialize_seq(SeqVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::AvlSet;
    use crate::avl_tree::Error;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_len_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: AvlSet<u32> = AvlSet::new();
        assert_eq!(set.min(), Err(Error::EmptyTree));
        assert_eq!(set.max(), Err(Error::EmptyTree));
    }

    #[test]
    fn test_insert() {
        let mut set = AvlSet::new();
        assert_eq!(set.insert(1), Ok(()));
        assert!(set.contains(&1));
    }

    #[test]
    fn test_insert_duplicate() {
        let mut set = AvlSet::new();
        assert_eq!(set.insert(1), Ok(()));
        assert_eq!(set.insert(1), Err(Error::DuplicateKey));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut set = AvlSet::new();
        set.insert(1).unwrap();
        assert_eq!(set.remove(&1), Some(1));
        assert!(!set.contains(&1));
        assert_eq!(set.remove(&1), None);
    }

    #[test]
    fn test_min_max() {
        let mut set = AvlSet::new();
        set.insert(1).unwrap();
        set.insert(3).unwrap();
        set.insert(5).unwrap();

        assert_eq!(set.min(), Ok(&1));
        assert_eq!(set.max(), Ok(&5));
    }

    #[test]
    fn test_floor_ceil_predecessor() {
        let mut set = AvlSet::new();
        set.insert(1).unwrap();
        set.insert(3).unwrap();
        set.insert(5).unwrap();

        assert_eq!(set.floor(&0), None);
        assert_eq!(set.floor(&2), Some(&1));
        assert_eq!(set.ceil(&2), Some(&3));
        assert_eq!(set.ceil(&6), None);
        assert_eq!(set.predecessor(&1), None);
        assert_eq!(set.predecessor(&5), Some(&3));
    }

    #[test]
    fn test_for_each_rev() {
        let mut set = AvlSet::new();
        for key in 1..6 {
            set.insert(key).unwrap();
        }

        let mut keys = Vec::new();
        set.for_each_rev(|key| keys.push(*key));
        assert_eq!(keys, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_keys_in_range() {
        let mut set = AvlSet::new();
        for key in &[10, 20, 30, 40, 50] {
            set.insert(*key).unwrap();
        }

        assert_eq!(set.keys_in_range(&15, &45), vec![&20, &30, &40]);
    }

    #[test]
    fn test_is_subtree() {
        let mut set = AvlSet::new();
        set.insert(2).unwrap();
        set.insert(1).unwrap();
        set.insert(3).unwrap();

        let mut single = AvlSet::new();
        single.insert(1).unwrap();
        assert!(set.is_subtree(&single));

        let mut missing = AvlSet::new();
        missing.insert(4).unwrap();
        assert!(!set.is_subtree(&missing));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut set = AvlSet::new();
        for key in 0..10 {
            set.insert(key).unwrap();
        }

        let mut copy = set.clone();
        assert_eq!(copy, set);

        copy.remove(&3);
        assert!(set.contains(&3));
        assert_eq!(set.len(), 10);
    }

    #[test]
    fn test_render() {
        let mut set = AvlSet::new();
        set.insert(2).unwrap();
        set.insert(1).unwrap();
        set.insert(3).unwrap();

        assert_eq!(set.render(), "R----2\n   L----1\n   R----3\n");
    }

    #[test]
    fn test_into_iter() {
        let mut set = AvlSet::new();
        set.insert(1).unwrap();
        set.insert(5).unwrap();
        set.insert(3).unwrap();

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let mut set = AvlSet::new();
        set.insert(1).unwrap();
        set.insert(5).unwrap();
        set.insert(3).unwrap();

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_serde() {
        let mut set = AvlSet::new();
        set.insert(1).unwrap();
        set.insert(2).unwrap();

        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(2) },
                Token::I32(1),
                Token::I32(2),
                Token::SeqEnd,
            ],
        );
    }
}
