// ─────────────────────────────────────────────────────────────────────────────
// Serde support
// ─────────────────────────────────────────────────────────────────────────────
//
// A variable serializes as `{"value": <SI value>, "unit": <canonical unit>}`.
// Deserialization accepts any unit string and goes through the parser, so
// `{"value": 1.0, "unit": "km"}` reads back as 1000 m. A missing `unit` means
// unitless.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

use crate::variable::DimensionalVariable;

impl Serialize for DimensionalVariable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("DimensionalVariable", 2)?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("unit", &self.dimension().unit_string())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for DimensionalVariable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(field_identifier, rename_all = "lowercase")]
        enum Field {
            Value,
            Unit,
        }

        struct DvVisitor;

        impl<'de> Visitor<'de> for DvVisitor {
            type Value = DimensionalVariable;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("struct DimensionalVariable with value and unit fields")
            }

            fn visit_map<V>(self, mut map: V) -> Result<DimensionalVariable, V::Error>
            where
                V: MapAccess<'de>,
            {
                let mut value: Option<f64> = None;
                let mut unit: Option<String> = None;

                while let Some(key) = map.next_key()? {
                    match key {
                        Field::Value => {
                            if value.is_some() {
                                return Err(de::Error::duplicate_field("value"));
                            }
                            value = Some(map.next_value()?);
                        }
                        Field::Unit => {
                            if unit.is_some() {
                                return Err(de::Error::duplicate_field("unit"));
                            }
                            unit = Some(map.next_value()?);
                        }
                    }
                }

                let value = value.ok_or_else(|| de::Error::missing_field("value"))?;
                DimensionalVariable::new(value, unit.as_deref().unwrap_or(""))
                    .map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_struct(
            "DimensionalVariable",
            &["value", "unit"],
            DvVisitor,
        )
    }
}
