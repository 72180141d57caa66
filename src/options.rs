//! Conversion options forwarded to FBX2glTF
//!
//! [`ConversionOptions`] mirrors the option record the host collects from the user.
//! Decoding is permissive: a value of the wrong JSON type, an unknown
//! enum member or a non-integral number decodes as "absent" instead of failing.
//! FBX2glTF's own argument parser is the validator, so nothing here rejects input.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Material model requested for the glTF output
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialMode {
    /// PBR metallic-roughness materials
    Pbr,
    /// `KHR_materials_unlit` materials
    Unlit,
}

/// When to emit 32-bit vertex indices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LongIndices {
    /// Always use 16-bit indices
    Never,
    /// Use 32-bit indices only for meshes that need them
    Auto,
    /// Always use 32-bit indices
    Always,
}

/// When to recompute vertex normals
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeNormals {
    /// Never recompute
    Never,
    /// Recompute normals that are broken
    Broken,
    /// Compute normals only where the mesh has none
    Missing,
    /// Always recompute
    Always,
}

/// Frame rate used when baking animations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimFramerate {
    /// Bake at 24 fps
    Bake24,
    /// Bake at 30 fps
    Bake30,
    /// Bake at 60 fps
    Bake60,
}

/// Value returned when parsing an option member that is not in the legal set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMember(pub String);

impl fmt::Display for UnknownMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown option value: {}", self.0)
    }
}

impl std::error::Error for UnknownMember {}

// Option enums share one textual form: the flag value FBX2glTF expects.
macro_rules! option_member {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// Value as passed on the FBX2glTF command line
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownMember;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownMember(other.to_string())),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

option_member!(MaterialMode { Pbr => "pbr", Unlit => "unlit" });
option_member!(LongIndices { Never => "never", Auto => "auto", Always => "always" });
option_member!(ComputeNormals {
    Never => "never",
    Broken => "broken",
    Missing => "missing",
    Always => "always",
});
option_member!(AnimFramerate { Bake24 => "bake24", Bake30 => "bake30", Bake60 => "bake60" });

/// Per-attribute quantization bit depths for Draco compression
///
/// Each attribute kind is independent; `None` leaves the converter's default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DracoBits {
    /// Bits for vertex positions
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<i64>,

    /// Bits for texture coordinates
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub uv: Option<i64>,

    /// Bits for normals
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub normals: Option<i64>,

    /// Bits for vertex colors
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub colors: Option<i64>,

    /// Bits for all other attributes
    #[serde(
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub other: Option<i64>,
}

/// Draco settings, only consulted when [`ConversionOptions::draco`] is set
///
/// Flattened into the option record so the wire shape keeps the
/// `dracoCompressionLevel` / `dracoBits` keys at the top level.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DracoOptions {
    /// Compression level (the converter accepts 0-10)
    #[serde(
        rename = "dracoCompressionLevel",
        default,
        deserialize_with = "lenient::integer",
        skip_serializing_if = "Option::is_none"
    )]
    pub compression_level: Option<i64>,

    /// Quantization bit depths
    #[serde(rename = "dracoBits", default, deserialize_with = "lenient::object_or_default")]
    pub bits: DracoBits,
}

/// Options record for one batch, shared by every file in it
///
/// # Examples
///
/// ```
/// use fbx2gltf_batch::options::{ConversionOptions, MaterialMode};
///
/// let options: ConversionOptions = serde_json::from_str(
///     r#"{"binary": true, "material": "pbr", "longIndices": "sometimes"}"#,
/// ).unwrap();
///
/// assert!(options.binary);
/// assert_eq!(options.material, Some(MaterialMode::Pbr));
/// // Unknown members are dropped, not rejected
/// assert_eq!(options.long_indices, None);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Write a single binary `.glb` instead of `.gltf` + resources
    #[serde(default, deserialize_with = "lenient::flag")]
    pub binary: bool,

    /// Embed resources in the `.gltf` (ignored when `binary` is set)
    #[serde(default, deserialize_with = "lenient::flag")]
    pub embed: bool,

    /// Ask the converter for verbose output
    #[serde(default, deserialize_with = "lenient::flag")]
    pub verbose: bool,

    /// Material model (`None` keeps the converter's default)
    #[serde(
        default,
        deserialize_with = "lenient::member",
        skip_serializing_if = "Option::is_none"
    )]
    pub material: Option<MaterialMode>,

    /// Flip the U texture coordinate (`None` omits both flags)
    #[serde(
        default,
        deserialize_with = "lenient::tri_state",
        skip_serializing_if = "Option::is_none"
    )]
    pub flip_u: Option<bool>,

    /// Flip the V texture coordinate (`None` omits both flags)
    #[serde(
        default,
        deserialize_with = "lenient::tri_state",
        skip_serializing_if = "Option::is_none"
    )]
    pub flip_v: Option<bool>,

    /// 32-bit index policy
    #[serde(
        default,
        deserialize_with = "lenient::member",
        skip_serializing_if = "Option::is_none"
    )]
    pub long_indices: Option<LongIndices>,

    /// Normal recomputation policy
    #[serde(
        default,
        deserialize_with = "lenient::member",
        skip_serializing_if = "Option::is_none"
    )]
    pub compute_normals: Option<ComputeNormals>,

    /// Animation baking frame rate
    #[serde(
        default,
        deserialize_with = "lenient::member",
        skip_serializing_if = "Option::is_none"
    )]
    pub anim_framerate: Option<AnimFramerate>,

    /// Export FBX user properties as glTF extras
    #[serde(default, deserialize_with = "lenient::flag")]
    pub user_properties: bool,

    /// Enable Draco mesh compression
    #[serde(default, deserialize_with = "lenient::flag")]
    pub draco: bool,

    /// Draco tuning, ignored unless `draco` is set
    #[serde(flatten)]
    pub draco_options: DracoOptions,

    /// Vertex attributes to keep, in order
    #[serde(
        default,
        deserialize_with = "lenient::string_list",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub keep_attributes: Vec<String>,

    /// Scratch directory the converter uses while unpacking the FBX
    #[serde(
        default,
        deserialize_with = "lenient::non_empty_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fbx_temp_dir: Option<String>,
}

/// Deserializers that normalize malformed values to "absent"
///
/// Each one reads an arbitrary JSON value first, so a type mismatch can never
/// surface as a decode error.
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::{Number, Value};
    use std::str::FromStr;

    pub(super) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
    }

    pub(super) fn tri_state<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?.as_bool())
    }

    pub(super) fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => as_integer(&n),
            _ => None,
        })
    }

    pub(super) fn member<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: FromStr,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => s.parse().ok(),
            _ => None,
        })
    }

    pub(super) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        })
    }

    pub(super) fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) if !s.is_empty() => Some(s),
            _ => None,
        })
    }

    /// Decode a JSON object into `T`; any other shape yields `T::default()`
    ///
    /// Derived struct visitors also accept sequences positionally, so arrays are
    /// filtered out before `T` sees them.
    pub(super) fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(match Value::deserialize(deserializer)? {
            value @ Value::Object(_) => T::deserialize(value).unwrap_or_default(),
            _ => T::default(),
        })
    }

    /// Integral JSON number, including float spellings such as `14.0`
    ///
    /// Values outside the `i64` range (`1e20`, `u64::MAX`) are dropped even though
    /// they are integral. No FBX2glTF option accepts numbers that large.
    fn as_integer(n: &Number) -> Option<i64> {
        if let Some(i) = n.as_i64() {
            return Some(i);
        }
        n.as_f64()
            .filter(|f| f.is_finite() && f.fract() == 0.0)
            .filter(|f| *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    }
}
