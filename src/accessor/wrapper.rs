// Thu Jan 16 2026 - Alex

use crate::accessor::DataAccessorPtr;
use crate::memory::{Length, Result};
use crate::variant::{NumConvertible, NumVariant};
use std::sync::Arc;

/// Carries an accessor where a [`NumConvertible`] is expected.
///
/// Its value is the accessor's identity, never its contents. Deliberately not
/// `Clone`: new wrappers only come from [`AccessorWrapper::nested_copy`].
pub struct AccessorWrapper {
    accessor: DataAccessorPtr,
}

impl AccessorWrapper {
    pub fn new(accessor: DataAccessorPtr) -> Self {
        Self { accessor }
    }

    pub fn get(&self) -> DataAccessorPtr {
        Arc::clone(&self.accessor)
    }

    pub fn nested_copy(&self, offset: usize, length: Length) -> Result<Self> {
        Ok(Self::new(self.accessor.nested_copy(offset, length)?))
    }
}

impl NumConvertible for AccessorWrapper {
    fn value(&self) -> NumVariant {
        NumVariant::Handle(Arc::as_ptr(&self.accessor) as *const () as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accessor::cache_accessor;

    #[test]
    fn test_value_is_identity() {
        let acc = cache_accessor(vec![0xff; 8]);
        let first = AccessorWrapper::new(Arc::clone(&acc));
        let second = AccessorWrapper::new(acc);
        assert!(first.value().is_handle());
        assert_eq!(first.value(), second.value());
        assert_ne!(first.value(), NumVariant::U64(u64::MAX));
    }

    #[test]
    fn test_nested_copy_is_a_new_identity() {
        let wrapper = AccessorWrapper::new(cache_accessor(vec![1, 2, 3, 4]));
        let nested = wrapper.nested_copy(2, Length::Rest).unwrap();
        assert_ne!(wrapper.value(), nested.value());
        assert_eq!(nested.get().read_word(0).unwrap(), 0x0403);
        assert!(wrapper.nested_copy(5, Length::Rest).is_err());
    }
}
