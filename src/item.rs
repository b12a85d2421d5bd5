use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use num_traits::Unsigned;

/// A value that can be stored in a [`HashTree`](crate::tree::HashTree).
///
/// The key must be stable: once an item is in the tree, `key` has to keep returning the same
/// number. The tree finds an item again by recomputing the residues used to place it, so a key
/// that drifts leaves the item unreachable. This is not checked.
pub trait Item {
    fn key(&self) -> u32;
}

macro_rules! unsigned_item {
    ($($t:ty),*) => {
        $(
            impl Item for $t {
                #[inline(always)]
                fn key(&self) -> u32 {
                    u32::from(*self)
                }
            }
        )*
    };
}

unsigned_item!(u8, u16, u32);

impl<T: Item + ?Sized> Item for &T {
    #[inline]
    fn key(&self) -> u32 {
        (**self).key()
    }
}

impl<T: Item + ?Sized> Item for Box<T> {
    #[inline]
    fn key(&self) -> u32 {
        (**self).key()
    }
}

impl<T: Item + ?Sized> Item for Rc<T> {
    #[inline]
    fn key(&self) -> u32 {
        (**self).key()
    }
}

impl<T: Item + ?Sized> Item for Arc<T> {
    #[inline]
    fn key(&self) -> u32 {
        (**self).key()
    }
}

/// A key paired with an arbitrary value.
///
/// Equality and hashing look at the key only, matching how the tree identifies entries. Any
/// unsigned primitive that widens losslessly into `u32` can serve as the key.
///
/// ```rust
/// use htree::{HashTree, Keyed};
///
/// let mut tree = HashTree::new();
/// tree.put(Keyed::new(123u32, "data1"));
/// // Lookups only need something with the same key.
/// assert_eq!(tree.get(&123u32).map(|e| e.value), Some("data1"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Keyed<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> Keyed<K, V>
where
    K: Unsigned + Copy + Into<u32>,
{
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
}

impl<K, V> Item for Keyed<K, V>
where
    K: Unsigned + Copy + Into<u32>,
{
    #[inline(always)]
    fn key(&self) -> u32 {
        self.key.into()
    }
}

impl<K, V> PartialEq for Keyed<K, V>
where
    K: Unsigned + Copy + Into<u32>,
{
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for Keyed<K, V> where K: Unsigned + Copy + Into<u32> {}

impl<K, V> Hash for Keyed<K, V>
where
    K: Unsigned + Copy + Into<u32> + Hash,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}
