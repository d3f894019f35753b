use crate::avl_tree::node::Node;
use crate::avl_tree::{Error, Result};
use crate::entry::Entry;
use std::borrow::Borrow;
use std::cmp;
use std::cmp::Ordering;
use std::fmt;

pub type Tree<T, U> = Option<Box<Node<T, U>>>;

pub fn height<T, U>(tree: &Tree<T, U>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => node.height,
    }
}

fn rotate_left<T, U>(mut node: Box<Node<T, U>>) -> Box<Node<T, U>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T, U>(mut node: Box<Node<T, U>>) -> Box<Node<T, U>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

// Recomputes the root's height and applies at most one rebalancing step. Callers propagate this
// bottom-up along the path of a structural change.
fn rebalance<T, U>(tree: &mut Tree<T, U>) {
    let mut node = match tree.take() {
        Some(node) => node,
        None => return,
    };

    node.update();

    if node.balance_factor() > 1 {
        if let Some(child) = node.left.take() {
            if child.balance_factor() < 0 {
                node.left = Some(rotate_left(child));
            } else {
                node.left = Some(child);
            }
        }
        node = rotate_right(node);
    } else if node.balance_factor() < -1 {
        if let Some(child) = node.right.take() {
            if child.balance_factor() > 0 {
                node.right = Some(rotate_right(child));
            } else {
                node.right = Some(child);
            }
        }
        node = rotate_left(node);
    }

    *tree = Some(node);
}

pub fn insert<T, U>(tree: &mut Tree<T, U>, new_node: Node<T, U>) -> Result<()>
where
    T: Ord,
{
    match tree {
        Some(ref mut node) => match new_node.entry.key.cmp(&node.entry.key) {
            Ordering::Less => insert(&mut node.left, new_node)?,
            Ordering::Greater => insert(&mut node.right, new_node)?,
            Ordering::Equal => return Err(Error::DuplicateKey),
        },
        None => {
            *tree = Some(Box::new(new_node));
            return Ok(());
        },
    }
    rebalance(tree);
    Ok(())
}

// precondition: the tree is non-empty
fn remove_min<T, U>(tree: &mut Tree<T, U>) -> Box<Node<T, U>> {
    let has_left = match tree {
        Some(ref node) => node.left.is_some(),
        None => unreachable!(),
    };

    if has_left {
        let min_node = match tree {
            Some(ref mut node) => remove_min(&mut node.left),
            None => unreachable!(),
        };
        rebalance(tree);
        min_node
    } else {
        match tree.take() {
            Some(mut node) => {
                *tree = node.right.take();
                node
            },
            None => unreachable!(),
        }
    }
}

// Promotes the minimum node of the right subtree (the in-order successor) to be the root of the
// merged subtree. The caller rebalances the result.
fn combine_subtrees<T, U>(left_tree: Tree<T, U>, mut right_tree: Tree<T, U>) -> Tree<T, U> {
    let mut new_root = remove_min(&mut right_tree);
    new_root.left = left_tree;
    new_root.right = right_tree;
    Some(new_root)
}

pub fn remove<T, U, V>(tree: &mut Tree<T, U>, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let ret = match tree.take() {
        Some(mut node) => match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => {
                let ret = remove(&mut node.left, key);
                *tree = Some(node);
                ret
            },
            Ordering::Greater => {
                let ret = remove(&mut node.right, key);
                *tree = Some(node);
                ret
            },
            Ordering::Equal => {
                let Node { entry, left, right, .. } = *node;
                *tree = match (left, right) {
                    (None, right) => right,
                    (left, None) => left,
                    (left, right) => combine_subtrees(left, right),
                };
                Some(entry)
            },
        },
        None => return None,
    };

    rebalance(tree);
    ret
}

pub fn get<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => get(&node.left, key),
        Ordering::Greater => get(&node.right, key),
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn get_mut<'a, T, U, V>(tree: &'a mut Tree<T, U>, key: &V) -> Option<&'a mut Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_mut().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => get_mut(&mut node.left, key),
        Ordering::Greater => get_mut(&mut node.right, key),
        Ordering::Equal => Some(&mut node.entry),
    })
}

pub fn ceil<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Greater => ceil(&node.right, key),
        Ordering::Less => match ceil(&node.left, key) {
            None => Some(&node.entry),
            res => res,
        },
        Ordering::Equal => Some(&node.entry),
    })
}

pub fn floor<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Less => floor(&node.left, key),
        Ordering::Greater => match floor(&node.right, key) {
            None => Some(&node.entry),
            res => res,
        },
        Ordering::Equal => Some(&node.entry),
    })
}

// Largest entry whose key compares strictly less than `key`.
pub fn predecessor<'a, T, U, V>(tree: &'a Tree<T, U>, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    tree.as_ref().and_then(|node| match key.cmp(node.entry.key.borrow()) {
        Ordering::Greater => match predecessor(&node.right, key) {
            None => Some(&node.entry),
            res => res,
        },
        _ => predecessor(&node.left, key),
    })
}

pub fn min<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.entry
    })
}

pub fn max<T, U>(tree: &Tree<T, U>) -> Option<&Entry<T, U>> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.entry
    })
}

pub fn count<T, U>(tree: &Tree<T, U>) -> usize {
    match tree {
        None => 0,
        Some(ref node) => 1 + count(&node.left) + count(&node.right),
    }
}

// Recomputes the height of every subtree from scratch, returning `None` as soon as some node
// violates the AVL invariant. The cached heights are deliberately not consulted.
fn checked_height<T, U>(tree: &Tree<T, U>) -> Option<usize> {
    let node = match tree {
        None => return Some(0),
        Some(ref node) => node,
    };
    let left = checked_height(&node.left)?;
    let right = checked_height(&node.right)?;
    if left > right + 1 || right > left + 1 {
        return None;
    }
    Some(cmp::max(left, right) + 1)
}

pub fn is_balanced<T, U>(tree: &Tree<T, U>) -> bool {
    checked_height(tree).is_some()
}

pub fn for_each_rev<T, U, F>(tree: &Tree<T, U>, visit: &mut F)
where
    F: FnMut(&T, &U),
{
    if let Some(ref node) = tree {
        for_each_rev(&node.right, visit);
        visit(&node.entry.key, &node.entry.value);
        for_each_rev(&node.left, visit);
    }
}

// Collects the keys in `[min, max]` in ascending order. A subtree that lies entirely outside the
// interval is not descended into.
pub fn keys_in_range<'a, T, U, V>(tree: &'a Tree<T, U>, min: &V, max: &V, keys: &mut Vec<&'a T>)
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    if let Some(ref node) = tree {
        let key = node.entry.key.borrow();
        if key > min {
            keys_in_range(&node.left, min, max, keys);
        }
        if min <= key && key <= max {
            keys.push(&node.entry.key);
        }
        if key < max {
            keys_in_range(&node.right, min, max, keys);
        }
    }
}

// Deep copy driven by an explicit work stack. The copy shares no nodes with the source and
// reproduces its exact shape and cached heights.
pub fn clone<T, U>(tree: &Tree<T, U>) -> Tree<T, U>
where
    T: Clone,
    U: Clone,
{
    let mut cloned = None;
    let mut stack = Vec::new();
    if let Some(ref node) = tree {
        stack.push((&**node, &mut cloned));
    }
    while let Some((source, dest)) = stack.pop() {
        *dest = Some(Box::new(Node {
            entry: source.entry.clone(),
            height: source.height,
            left: None,
            right: None,
        }));
        if let Some(node) = dest {
            if let Some(ref child) = source.left {
                stack.push((&**child, &mut node.left));
            }
            if let Some(ref child) = source.right {
                stack.push((&**child, &mut node.right));
            }
        }
    }
    cloned
}

// Structural match rooted at the given pair: equal keys at every position and identical shape,
// with values ignored. Driven by an explicit work stack.
fn matches<T, U, V>(tree: Option<&Node<T, U>>, other: Option<&Node<T, V>>) -> bool
where
    T: Ord,
{
    let mut stack = vec![(tree, other)];
    while let Some(pair) = stack.pop() {
        match pair {
            (None, None) => {},
            (Some(node), Some(other_node)) => {
                if node.entry.key != other_node.entry.key {
                    return false;
                }
                stack.push((
                    node.left.as_ref().map(|child| &**child),
                    other_node.left.as_ref().map(|child| &**child),
                ));
                stack.push((
                    node.right.as_ref().map(|child| &**child),
                    other_node.right.as_ref().map(|child| &**child),
                ));
            },
            _ => return false,
        }
    }
    true
}

// Tries every node of `tree` as a candidate root for a structural match of `other`. Candidates
// are not pruned by key order: a match is a question of shape, not of range.
pub fn is_subtree<T, U, V>(tree: &Tree<T, U>, other: &Tree<T, V>) -> bool
where
    T: Ord,
{
    let other_root = match other {
        Some(ref node) => &**node,
        None => return true,
    };

    let mut candidates = Vec::new();
    if let Some(ref node) = tree {
        candidates.push(&**node);
    }
    while let Some(node) = candidates.pop() {
        if matches(Some(node), Some(other_root)) {
            return true;
        }
        if let Some(ref child) = node.left {
            candidates.push(&**child);
        }
        if let Some(ref child) = node.right {
            candidates.push(&**child);
        }
    }
    false
}

// One line per node of the form `<prefix><R|L>----<key>`, where `R` and `L` mark whether the node
// is its parent's right or left child; the root counts as `R`. The left subtree is emitted before
// the right subtree, one level deeper than the parent.
pub fn render<T, U>(tree: &Tree<T, U>, out: &mut String)
where
    T: fmt::Display,
{
    if let Some(ref node) = tree {
        render_node(node, "", true, out);
    }
}

fn render_node<T, U>(node: &Node<T, U>, prefix: &str, is_right: bool, out: &mut String)
where
    T: fmt::Display,
{
    let branch = if is_right { "R" } else { "L" };
    out.push_str(&format!("{}{}----{}\n", prefix, branch, node.entry.key));
    let child_prefix = format!("{}{}", prefix, if is_right { "   " } else { "|  " });
    if let Some(ref left) = node.left {
        render_node(left, &child_prefix, false, out);
    }
    if let Some(ref right) = node.right {
        render_node(right, &child_prefix, true, out);
    }
}
