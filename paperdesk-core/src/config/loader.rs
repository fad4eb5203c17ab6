use std::collections::HashMap;
use std::path::Path;

use super::value::ConfigValue;
use super::ConfigError;

pub(crate) type Values = HashMap<String, ConfigValue>;

/// Merge a YAML file into `values`. A missing file is not an error.
pub(crate) fn merge_yaml_file(path: &Path, values: &mut Values) -> Result<(), ConfigError> {
    if !path.exists() {
        return Ok(());
    }
    let content = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))?;
    merge_yaml_str(&content, values)
        .map_err(|e| ConfigError::Load(format!("{}: {e}", path.display())))
}

/// Merge a YAML document into `values`, later keys overriding earlier ones.
pub(crate) fn merge_yaml_str(content: &str, values: &mut Values) -> Result<(), ConfigError> {
    let yaml: serde_yaml::Value =
        serde_yaml::from_str(content).map_err(|e| ConfigError::Load(e.to_string()))?;
    flatten_into("", &yaml, values);
    Ok(())
}

/// Overlay process environment variables: `DATABASE_URL` becomes `database.url`.
pub(crate) fn merge_env(values: &mut Values, vars: impl IntoIterator<Item = (String, String)>) {
    for (name, value) in vars {
        values.insert(env_key_to_config_key(&name), ConfigValue::String(value));
    }
}

pub(crate) fn env_key_to_config_key(name: &str) -> String {
    name.to_lowercase().replace('_', ".")
}

/// Flatten nested mappings into dot-separated keys.
///
/// Sequences are stored whole under their own key; scalars become leaves.
fn flatten_into(prefix: &str, node: &serde_yaml::Value, out: &mut Values) {
    match node {
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let segment = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    _ => continue,
                };
                let key = if prefix.is_empty() {
                    segment
                } else {
                    format!("{prefix}.{segment}")
                };
                flatten_into(&key, v, out);
            }
        }
        leaf if !prefix.is_empty() => {
            out.insert(prefix.to_string(), ConfigValue::from_yaml(leaf));
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_keys_are_dotted() {
        let mut values = Values::new();
        merge_yaml_str("server:\n  port: 8080\n  host: localhost\n", &mut values).unwrap();
        assert!(matches!(values.get("server.port"), Some(ConfigValue::Integer(8080))));
        assert!(matches!(values.get("server.host"), Some(ConfigValue::String(h)) if h == "localhost"));
    }

    #[test]
    fn later_documents_override() {
        let mut values = Values::new();
        merge_yaml_str("database:\n  url: a\n", &mut values).unwrap();
        merge_yaml_str("database:\n  url: b\n", &mut values).unwrap();
        assert!(matches!(values.get("database.url"), Some(ConfigValue::String(u)) if u == "b"));
    }

    #[test]
    fn env_names_map_to_dotted_keys() {
        assert_eq!(env_key_to_config_key("DATABASE_URL"), "database.url");
        assert_eq!(env_key_to_config_key("SERVER_PORT"), "server.port");
    }

    #[test]
    fn invalid_yaml_is_a_load_error() {
        let mut values = Values::new();
        let err = merge_yaml_str("server: [unclosed", &mut values).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }
}
