//! serde 支持：数组按 `f64` 序列序列化。

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::Float64ArrayLE;

impl Serialize for Float64ArrayLE {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for value in self.iter() {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

impl<'de> Deserialize<'de> for Float64ArrayLE {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Ok(Float64ArrayLE::of(&values))
    }
}

#[cfg(test)]
mod tests {
    use crate::Float64ArrayLE;
    use crate::codec::consts::ByteOrderTag;

    #[test]
    fn test_serialize_with_values_produces_json_array() {
        let arr = Float64ArrayLE::of(&[1.5, -2.25, 0.0]);
        assert_eq!(serde_json::to_string(&arr).unwrap(), "[1.5,-2.25,0.0]");
    }

    #[test]
    fn test_deserialize_with_json_array_builds_little_endian_array() {
        let arr: Float64ArrayLE = serde_json::from_str("[1, 2.5]").unwrap();
        assert_eq!(arr.to_vec(), vec![1.0, 2.5]);
        assert_eq!(&arr.to_bytes()[8..], &2.5f64.to_le_bytes());
    }

    #[test]
    fn test_byte_order_tag_serializes_as_string() {
        assert_eq!(
            serde_json::to_string(&ByteOrderTag::LittleEndian).unwrap(),
            "\"little-endian\""
        );
        let tag: ByteOrderTag = serde_json::from_str("\"big-endian\"").unwrap();
        assert_eq!(tag, ByteOrderTag::BigEndian);
    }

    #[test]
    fn test_deserialize_with_non_numeric_element_returns_error() {
        assert!(serde_json::from_str::<Float64ArrayLE>("[1, \"x\"]").is_err());
    }
}
