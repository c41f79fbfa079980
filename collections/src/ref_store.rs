use itertools::Itertools;
use std::fmt::{Debug, Error, Formatter};
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

pub trait Ref: Into<usize> + From<usize> + Copy + PartialEq {}

impl<X> Ref for X where X: Into<usize> + From<usize> + Copy + PartialEq {}

/// Declares a new handle type, backed by a `NonZeroU32` so that `Option<Handle>` has the size of a `u32`.
///
/// The handle converts from and to `usize`, which makes it usable as a key in [`RefVec`]
/// and [`RefSet`](crate::RefSet).
#[macro_export]
macro_rules! create_ref_type {
    ($type_name:ident) => {
        #[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Debug)]
        pub struct $type_name(std::num::NonZeroU32);

        impl $type_name {
            pub const fn to_u32(self) -> u32 {
                self.0.get() - 1
            }
            pub const fn from_u32(u: u32) -> Self {
                match std::num::NonZeroU32::new(u + 1) {
                    Some(id) => $type_name(id),
                    None => panic!("handle overflow"),
                }
            }
        }
        impl From<usize> for $type_name {
            fn from(u: usize) -> Self {
                Self::from_u32(u as u32)
            }
        }
        impl From<$type_name> for usize {
            fn from(v: $type_name) -> Self {
                (v.0.get() - 1) as usize
            }
        }

        impl std::fmt::Display for $type_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.to_u32())
            }
        }
    };
}

/// Dense vector whose indices are handles of type `K`.
///
/// Keys are attributed contiguously: the n-th pushed value has key `K::from(n)`.
#[derive(Clone, PartialEq, Eq)]
pub struct RefVec<K, V> {
    values: Vec<V>,
    phantom: PhantomData<K>,
}

impl<K, V> Default for RefVec<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RefVec<K, V> {
    pub fn new() -> Self {
        RefVec {
            values: Vec::new(),
            phantom: PhantomData,
        }
    }

    /// Creates a new RefVec with the given `value` repeated `num_items` times.
    pub fn with_values(num_items: usize, value: V) -> Self
    where
        V: Clone,
    {
        RefVec {
            values: vec![value; num_items],
            phantom: PhantomData,
        }
    }

    /// Creates a new RefVec of `num_items` values, each produced by `value_gen`.
    pub fn from_fn(num_items: usize, value_gen: impl FnMut() -> V) -> Self {
        let mut value_gen = value_gen;
        RefVec {
            values: (0..num_items).map(|_| value_gen()).collect(),
            phantom: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn push(&mut self, value: V) -> K
    where
        K: From<usize>,
    {
        self.values.push(value);
        K::from(self.values.len() - 1)
    }

    pub fn get(&self, k: K) -> Option<&V>
    where
        K: Ref,
    {
        let index: usize = k.into();
        self.values.get(index)
    }

    pub fn keys(&self) -> impl Iterator<Item = K>
    where
        K: From<usize>,
    {
        (0..(self.values.len())).map(K::from)
    }

    pub fn entries(&self) -> impl Iterator<Item = (K, &V)>
    where
        K: From<usize>,
    {
        self.values.iter().enumerate().map(|(i, v)| (K::from(i), v))
    }
}

impl<K: Into<usize>, V> Index<K> for RefVec<K, V> {
    type Output = V;

    fn index(&self, index: K) -> &Self::Output {
        let index: usize = index.into();
        &self.values[index]
    }
}

impl<K: Into<usize>, V> IndexMut<K> for RefVec<K, V> {
    fn index_mut(&mut self, index: K) -> &mut Self::Output {
        let index: usize = index.into();
        &mut self.values[index]
    }
}

impl<K, V> FromIterator<V> for RefVec<K, V> {
    fn from_iter<T: IntoIterator<Item = V>>(iter: T) -> Self {
        RefVec {
            values: iter.into_iter().collect(),
            phantom: PhantomData,
        }
    }
}

impl<K: Ref + Debug, V: Debug> Debug for RefVec<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(
            f,
            "[{}]",
            self.entries().map(|(k, v)| format!("{k:?} -> {v:?}")).format(", ")
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    crate::create_ref_type!(Key);

    #[test]
    fn test_handles() {
        let k = Key::from(3usize);
        assert_eq!(k.to_u32(), 3);
        assert_eq!(usize::from(k), 3);
        assert_eq!(Key::from_u32(0), Key::from(0usize));
        assert_eq!(std::mem::size_of::<Option<Key>>(), std::mem::size_of::<u32>());
        assert_eq!(k.to_string(), "3");
    }

    #[test]
    fn test_ref_vec() {
        let mut v: RefVec<Key, &str> = RefVec::new();
        let a = v.push("a");
        let b = v.push("b");
        assert_eq!(a, Key::from(0usize));
        assert_eq!(v[b], "b");
        assert!(v.get(Key::from(2usize)).is_none());
        v[a] = "c";
        assert_eq!(v.entries().collect::<Vec<_>>(), vec![(a, &"c"), (b, &"b")]);
    }
}
