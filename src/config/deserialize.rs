// ABOUTME: Custom serde deserializers for config types.
// ABOUTME: Rejects empty or blank platform lists.

use nonempty::NonEmpty;
use serde::Deserialize;

pub fn deserialize_platforms<'de, D>(deserializer: D) -> Result<NonEmpty<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<String> = Vec::deserialize(deserializer)?;
    let platforms = values
        .into_iter()
        .map(|p| p.trim().to_string())
        .map(|p| {
            if p.is_empty() {
                Err("platform cannot be blank")
            } else {
                Ok(p)
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(serde::de::Error::custom)?;

    NonEmpty::from_vec(platforms)
        .ok_or_else(|| serde::de::Error::custom("at least one platform is required"))
}
