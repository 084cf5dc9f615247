#![cfg(feature = "serde")]

use serde::ser::*;

use crate::colorspace::ColorSpace;

impl Serialize for ColorSpace {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // colorspace serialization is simply it's debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}

#[test]
fn test_colorspace_serializes_as_name() {
    let out = serde_json::to_string(&ColorSpace::RGBA).unwrap();
    assert_eq!(out, "\"RGBA\"");
}
