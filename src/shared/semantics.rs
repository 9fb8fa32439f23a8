//! Value semantics for OCPI objects.
//!
//! `value_semantics!` implements `PartialEq`, `Eq`, `Hash`, `PartialOrd` and
//! `Ord` for a struct from two field lists: scalar fields in comparison
//! priority order, then list fields which are compared as sets.
//!
//! ```ignore
//! value_semantics!(Hours {
//!     twenty_four_seven
//! } sets {
//!     regular_hours,
//!     exceptional_openings,
//!     exceptional_closings
//! });
//! ```

macro_rules! value_semantics {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        $crate::shared::semantics::value_semantics!($ty { $($field),* } sets {});
    };
    ($ty:ident { $($field:ident),* $(,)? } sets { $($set:ident),* $(,)? }) => {
        impl ::std::cmp::PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                true
                    $(&& self.$field == other.$field)*
                    $(&& $crate::shared::collections::set_eq(&self.$set, &other.$set))*
            }
        }

        impl ::std::cmp::Eq for $ty {}

        impl ::std::hash::Hash for $ty {
            fn hash<H: ::std::hash::Hasher>(&self, state: &mut H) {
                $(::std::hash::Hash::hash(&self.$field, state);)*
                $($crate::shared::collections::hash_set(&self.$set, state);)*
            }
        }

        impl ::std::cmp::PartialOrd for $ty {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(::std::cmp::Ord::cmp(self, other))
            }
        }

        impl ::std::cmp::Ord for $ty {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                ::std::cmp::Ordering::Equal
                    $(.then_with(|| ::std::cmp::Ord::cmp(&self.$field, &other.$field)))*
                    $(.then_with(|| $crate::shared::collections::set_cmp(&self.$set, &other.$set)))*
            }
        }
    };
}

pub(crate) use value_semantics;

/// Hash of `value` with the default hasher.
#[cfg(test)]
pub(crate) fn hash_of<T: std::hash::Hash>(value: &T) -> u64 {
    use std::hash::Hasher;

    let mut hasher = std::collections::hash_map::DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}
