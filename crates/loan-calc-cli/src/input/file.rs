use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON or YAML file (by extension) and deserialise into a typed struct.
pub fn read_input<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;

    let value: T = if is_yaml(&canonical) {
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?
    };
    Ok(value)
}

/// Typed input from `--input`, else piped stdin, else `None`.
pub fn read_input_or_stdin<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return Ok(Some(read_input(path)?));
    }
    match super::stdin::read_stdin()? {
        Some(data) => Ok(Some(serde_json::from_value::<T>(data)?)),
        None => Ok(None),
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use loan_calc_core::affordability::AffordabilityPolicy;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reads_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("policy.yaml");
        fs::write(&yaml, "max_debt_service_ratio: \"0.35\"\n").unwrap();
        let json = dir.path().join("policy.json");
        fs::write(&json, r#"{"high_risk_dsr": "55"}"#).unwrap();

        let from_yaml: AffordabilityPolicy = read_input(yaml.to_str().unwrap()).unwrap();
        assert_eq!(from_yaml.max_debt_service_ratio, dec!(0.35));
        let from_json: AffordabilityPolicy = read_input(json.to_str().unwrap()).unwrap();
        assert_eq!(from_json.high_risk_dsr, dec!(55));
    }

    #[test]
    fn test_missing_file() {
        let err = read_input::<AffordabilityPolicy>("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }
}
