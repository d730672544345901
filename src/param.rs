//! Flat `key=value` parameter files consumed by the external evaluator.

use crate::error::Result;
use std::path::Path;

/// Ordered string-to-string parameter set.
///
/// Keys keep their first-insertion order so the file written for each sweep
/// iteration stays line-for-line comparable with the hand-maintained base
/// file it was derived from.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a parameter file. Lines that do not split on `=` into exactly two
    /// segments are skipped; this is how the original files mix free text and
    /// parameters without a dedicated comment syntax.
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut params = Params::new();
        for line in text.lines() {
            let seg: Vec<&str> = line.trim().split('=').collect();
            if seg.len() != 2 {
                continue;
            }
            params.set(seg[0], seg[1]);
        }
        Ok(params)
    }

    /// Overwrite `path` with one `key=value` line per entry, in insertion order.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut out = String::new();
        for (key, value) in &self.entries {
            out.push_str(key);
            out.push('=');
            out.push_str(value);
            out.push('\n');
        }
        std::fs::write(path, out)?;
        Ok(())
    }

    /// Insert or overwrite a key. An existing key keeps its position.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_skips_malformed_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("base.param");
        fs::write(
            &path,
            "indexPath=./index\n\nthis line has no separator\na=b=c\nretrievalAlgorithm=Indri\n",
        )
        .unwrap();

        let params = Params::read(&path).unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("indexPath"), Some("./index"));
        assert_eq!(params.get("retrievalAlgorithm"), Some("Indri"));
        assert_eq!(params.get("a"), None);
    }

    #[test]
    fn test_read_write_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("base.param");
        fs::write(&path, "fb=false\nfbMu=0\nfbDocs=10\n").unwrap();

        let params = Params::read(&path).unwrap();
        let out_path = temp_dir.path().join("out.param");
        params.write(&out_path).unwrap();

        let rewritten = Params::read(&out_path).unwrap();
        assert_eq!(rewritten.len(), params.len());
        for (key, value) in params.iter() {
            assert_eq!(rewritten.get(key), Some(value));
        }
        // Insertion order survives the roundtrip
        assert_eq!(
            fs::read_to_string(&out_path).unwrap(),
            "fb=false\nfbMu=0\nfbDocs=10\n"
        );
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut params = Params::new();
        params.set("fbOrigWeight", "0.0");
        params.set("fbInitialRankingFile", "my-sdm");
        params.set("fbOrigWeight", "0.5");

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("fbOrigWeight"), Some("0.5"));
        // Overwritten key kept its original position
        assert_eq!(params.iter().next().unwrap().0, "fbOrigWeight");
    }

    #[test]
    fn test_write_overwrites_previous_contents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("temp_param.txt");
        fs::write(&path, "stale=value\nanother=leftover\n").unwrap();

        let mut params = Params::new();
        params.set("fb", "false");
        params.write(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "fb=false\n");
    }
}
