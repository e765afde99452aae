// Thu Jan 16 2026 - Alex

use std::fmt;

/// Tagged numeric value: any integer width/signedness, either float, or an opaque handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumVariant {
    I8(i8),
    U8(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Handle(usize),
}

impl NumVariant {
    pub fn size(&self) -> usize {
        match self {
            Self::I8(_) | Self::U8(_) => 1,
            Self::I16(_) | Self::U16(_) => 2,
            Self::I32(_) | Self::U32(_) | Self::F32(_) => 4,
            Self::I64(_) | Self::U64(_) | Self::F64(_) => 8,
            Self::Handle(_) => std::mem::size_of::<usize>(),
        }
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        match *self {
            Self::I8(v) => v.to_le_bytes().to_vec(),
            Self::U8(v) => v.to_le_bytes().to_vec(),
            Self::I16(v) => v.to_le_bytes().to_vec(),
            Self::U16(v) => v.to_le_bytes().to_vec(),
            Self::I32(v) => v.to_le_bytes().to_vec(),
            Self::U32(v) => v.to_le_bytes().to_vec(),
            Self::I64(v) => v.to_le_bytes().to_vec(),
            Self::U64(v) => v.to_le_bytes().to_vec(),
            Self::F32(v) => v.to_le_bytes().to_vec(),
            Self::F64(v) => v.to_le_bytes().to_vec(),
            Self::Handle(v) => v.to_le_bytes().to_vec(),
        }
    }

    pub fn is_handle(&self) -> bool {
        matches!(self, Self::Handle(_))
    }
}

impl fmt::Display for NumVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I8(v) => write!(f, "{}", v),
            Self::U8(v) => write!(f, "{}", v),
            Self::I16(v) => write!(f, "{}", v),
            Self::U16(v) => write!(f, "{}", v),
            Self::I32(v) => write!(f, "{}", v),
            Self::U32(v) => write!(f, "{}", v),
            Self::I64(v) => write!(f, "{}", v),
            Self::U64(v) => write!(f, "{}", v),
            Self::F32(v) => write!(f, "{}", v),
            Self::F64(v) => write!(f, "{}", v),
            Self::Handle(v) => write!(f, "<handle 0x{:x}>", v),
        }
    }
}

macro_rules! impl_from_num {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$t> for NumVariant {
                fn from(value: $t) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from_num!(
    i8 => I8, u8 => U8, i16 => I16, u16 => U16, i32 => I32, u32 => U32,
    i64 => I64, u64 => U64, f32 => F32, f64 => F64,
);

/// Anything that can present itself as a [`NumVariant`].
pub trait NumConvertible {
    fn value(&self) -> NumVariant;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizes_match_bytes() {
        let values = [
            NumVariant::from(1u8),
            NumVariant::from(-1i16),
            NumVariant::from(3.5f32),
            NumVariant::from(7u64),
            NumVariant::Handle(0x10),
        ];
        for value in values {
            assert_eq!(value.size(), value.to_le_bytes().len());
        }
    }

    #[test]
    fn test_little_endian_encoding() {
        assert_eq!(NumVariant::U32(0x11223344).to_le_bytes(), vec![0x44, 0x33, 0x22, 0x11]);
        assert_eq!(NumVariant::I8(-2).to_le_bytes(), vec![0xfe]);
    }
}
