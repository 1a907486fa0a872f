//! Resolution of policy keys arriving from typed or untyped callers
//!
//! Presentation code passes `Role`/`Module` values directly; request handlers
//! usually hold raw strings out of a session or a JSON body, sometimes missing.
//! Both resolve through `PolicyKey`, and anything unrecognized resolves to
//! `None`, which every predicate treats as a denial.

use super::{Capability, Module, Role};

pub trait PolicyKey<T> {
    fn resolve(&self) -> Option<T>;

    /// Key as the caller spelled it, resolvable or not
    fn key(&self) -> Option<String>;
}

macro_rules! policy_key {
    ($ty:ty) => {
        impl PolicyKey<$ty> for $ty {
            fn resolve(&self) -> Option<$ty> {
                Some(*self)
            }

            fn key(&self) -> Option<String> {
                Some(self.as_str().to_string())
            }
        }

        impl PolicyKey<$ty> for str {
            fn resolve(&self) -> Option<$ty> {
                <$ty>::parse(self)
            }

            fn key(&self) -> Option<String> {
                Some(self.to_string())
            }
        }

        impl PolicyKey<$ty> for String {
            fn resolve(&self) -> Option<$ty> {
                <$ty>::parse(self)
            }

            fn key(&self) -> Option<String> {
                Some(self.to_string())
            }
        }
    };
}

policy_key!(Role);
policy_key!(Module);
policy_key!(Capability);

impl<T, K: PolicyKey<T> + ?Sized> PolicyKey<T> for &K {
    fn resolve(&self) -> Option<T> {
        (**self).resolve()
    }

    fn key(&self) -> Option<String> {
        (**self).key()
    }
}

impl<T, K: PolicyKey<T>> PolicyKey<T> for Option<K> {
    fn resolve(&self) -> Option<T> {
        self.as_ref().and_then(|key| key.resolve())
    }

    fn key(&self) -> Option<String> {
        self.as_ref().and_then(|key| key.key())
    }
}
