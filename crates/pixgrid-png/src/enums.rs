#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

/// Chunk types the decoder acts on
///
/// Every other chunk is handed to the
/// [`UnknownChunkHandler`](crate::options::UnknownChunkHandler)
/// see table 5.3 of <https://www.w3.org/TR/2003/REC-PNG-20031110/>
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType {
    IHDR,
    IDAT,
    IEND,
    unkn
}

impl PngChunkType {
    pub const fn from_tag(tag: [u8; 4]) -> PngChunkType {
        match &tag {
            b"IHDR" => Self::IHDR,
            b"IDAT" => Self::IDAT,
            b"IEND" => Self::IEND,
            _ => Self::unkn
        }
    }
}

/// Return true if the chunk with this tag may be ignored by a decoder
///
/// Bit 5 of the first byte (a lowercase letter) marks a chunk ancillary
pub const fn is_ancillary(tag: [u8; 4]) -> bool {
    tag[0] & (1 << 5) != 0
}

/// The per-row filter types of filter method 0
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FilterMethod {
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterMethod {
    pub const ALL: [FilterMethod; 5] = [
        FilterMethod::None,
        FilterMethod::Sub,
        FilterMethod::Up,
        FilterMethod::Average,
        FilterMethod::Paeth
    ];

    pub const fn from_int(int: u8) -> Option<FilterMethod> {
        match int {
            0 => Some(FilterMethod::None),
            1 => Some(FilterMethod::Sub),
            2 => Some(FilterMethod::Up),
            3 => Some(FilterMethod::Average),
            4 => Some(FilterMethod::Paeth),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Sub => 1,
            Self::Up => 2,
            Self::Average => 3,
            Self::Paeth => 4
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum InterlaceMethod {
    #[default]
    Standard,
    Adam7
}

impl InterlaceMethod {
    pub const fn from_int(int: u8) -> Option<InterlaceMethod> {
        match int {
            0 => Some(Self::Standard),
            1 => Some(Self::Adam7),
            _ => None
        }
    }
}

/// Color types a png header may declare
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PngColor {
    Luma,
    Palette,
    LumaA,
    RGB,
    RGBA,
    #[default]
    Unknown
}

impl PngColor {
    pub const fn num_components(self) -> usize {
        match self {
            PngColor::Luma => 1,
            PngColor::Palette => 1,
            PngColor::LumaA => 2,
            PngColor::RGB => 3,
            PngColor::RGBA => 4,
            PngColor::Unknown => 0
        }
    }

    pub const fn from_int(int: u8) -> Option<PngColor> {
        match int {
            0 => Some(Self::Luma),
            2 => Some(Self::RGB),
            3 => Some(Self::Palette),
            4 => Some(Self::LumaA),
            6 => Some(Self::RGBA),
            _ => None
        }
    }
}

#[test]
fn test_ancillary_bit() {
    assert!(is_ancillary(*b"tEXt"));
    assert!(is_ancillary(*b"gAMA"));
    assert!(!is_ancillary(*b"PLTE"));
    assert!(!is_ancillary(*b"IDAT"));
}
