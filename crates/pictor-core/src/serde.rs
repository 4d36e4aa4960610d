#![cfg(feature = "serde")]

use alloc::format;

use serde::ser::*;

use crate::pixel::PixelFormat;

impl Serialize for PixelFormat {
    #[allow(clippy::uninlined_format_args)]
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        // pixel format serialization is simply its debug value
        serializer.serialize_str(&format!("{:?}", self))
    }
}
