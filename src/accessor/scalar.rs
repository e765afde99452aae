// Thu Jan 16 2026 - Alex

mod sealed {
    pub trait Sealed {}
}

/// Fixed-width value that accessors can read and write, always little-endian.
pub trait Scalar: Copy + sealed::Sealed {
    const SIZE: usize;

    /// Decodes from the first `SIZE` bytes of `bytes`.
    fn from_le(bytes: &[u8]) -> Self;

    /// Encodes into the first `SIZE` bytes of `out`.
    fn put_le(self, out: &mut [u8]);
}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl Scalar for $t {
                const SIZE: usize = std::mem::size_of::<$t>();

                fn from_le(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; std::mem::size_of::<$t>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$t>::from_le_bytes(raw)
                }

                fn put_le(self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_scalar!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

pub(crate) fn encode_all<T: Scalar>(values: &[T]) -> Vec<u8> {
    let mut raw = vec![0u8; values.len() * T::SIZE];
    for (chunk, value) in raw.chunks_exact_mut(T::SIZE).zip(values) {
        value.put_le(chunk);
    }
    raw
}

pub(crate) fn decode_all<T: Scalar>(raw: &[u8]) -> Vec<T> {
    raw.chunks_exact(T::SIZE).map(T::from_le).collect()
}
