use std::path::Path;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::map::MAX_MAP_TYPE;
use crate::movement::{LevySampler, NodeTypeFilter, RngSource, UniformSpeed, WalkOptions};

fn default_min_path_length() -> usize {
    10
}

fn default_lambda() -> f64 {
    1.2
}

fn default_permissible_error() -> f64 {
    180.0
}

fn default_world_size() -> [f64; 2] {
    [4500.0, 3400.0]
}

fn default_speed() -> [f64; 2] {
    [0.5, 1.5]
}

/// Settings of a Lévy walk model and the map it moves on.
///
/// ```toml
/// nrof_map_files = 2
/// map_files = ["roads.wkt", "rails.wkt"]
/// ok_maps = [1]
/// lambda = 1.2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevyWalkSettings {
    pub nrof_map_files: usize,
    pub map_files: Vec<String>,
    #[serde(default)]
    pub ok_maps: Option<Vec<i64>>,
    #[serde(default = "default_min_path_length")]
    pub min_path_length: usize,
    #[serde(default)]
    pub max_path_length: Option<usize>,
    #[serde(default = "default_lambda")]
    pub lambda: f64,
    #[serde(default = "default_permissible_error")]
    pub permissible_error: f64,
    #[serde(default)]
    pub back_allowed: bool,
    /// Width and height of the world every map must fit in.
    #[serde(default = "default_world_size")]
    pub world_size: [f64; 2],
    /// Lower and upper bound of the agent speed.
    #[serde(default = "default_speed")]
    pub speed: [f64; 2],
    /// Seed of the random source. Unseeded models draw from OS entropy.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl LevyWalkSettings {
    /// Create settings for the given map sources, with defaults for the rest.
    pub fn new(map_files: Vec<String>) -> Self {
        Self {
            nrof_map_files: map_files.len(),
            map_files,
            ok_maps: None,
            min_path_length: default_min_path_length(),
            max_path_length: None,
            lambda: default_lambda(),
            permissible_error: default_permissible_error(),
            back_allowed: false,
            world_size: default_world_size(),
            speed: default_speed(),
            rng_seed: None,
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Self = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| Error::Load {
            source_id: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Check every setting, naming the first invalid one.
    pub fn validate(&self) -> Result<()> {
        if self.nrof_map_files == 0 || self.nrof_map_files > MAX_MAP_TYPE as usize {
            return Err(Error::configuration(
                "nrof_map_files",
                self.nrof_map_files,
                format!("1..={}", MAX_MAP_TYPE),
            ));
        }
        if self.map_files.len() != self.nrof_map_files {
            return Err(Error::configuration(
                "map_files",
                format!("{} files", self.map_files.len()),
                format!("one file per map type ({})", self.nrof_map_files),
            ));
        }

        let [width, height] = self.world_size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(Error::configuration(
                "world_size",
                format!("[{}, {}]", width, height),
                "a positive width and height",
            ));
        }
        if !(self.permissible_error.is_finite() && self.permissible_error > 0.0) {
            return Err(Error::configuration(
                "permissible_error",
                self.permissible_error,
                "a finite number of degrees greater than 0",
            ));
        }

        LevySampler::new(self.lambda, self.min_path_length, self.max_path_length)?;
        UniformSpeed::new(self.speed[0], self.speed[1])?;
        NodeTypeFilter::from_settings(self.ok_maps.as_deref(), self.nrof_map_files)?;
        Ok(())
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            lambda: self.lambda,
            min_path_length: self.min_path_length,
            max_path_length: self.max_path_length,
            permissible_error: self.permissible_error,
            back_allowed: self.back_allowed,
        }
    }

    /// World size as (width, height).
    pub fn world_size(&self) -> (f64, f64) {
        (self.world_size[0], self.world_size[1])
    }

    pub fn random_source(&self) -> RngSource<StdRng> {
        self.rng_seed
            .map_or_else(RngSource::from_entropy, RngSource::seeded)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::movement::RandomProvider;

    #[test]
    fn test_defaults() {
        let settings = LevyWalkSettings::from_toml_str(
            r#"
            nrof_map_files = 1
            map_files = ["roads.wkt"]
            "#,
        )
        .unwrap();

        assert_eq!(settings, LevyWalkSettings::new(vec!["roads.wkt".to_string()]));
        assert_eq!(settings.walk_options(), WalkOptions::default());
        assert_eq!(settings.world_size(), (4500.0, 3400.0));
    }

    #[test]
    fn test_full_settings() {
        let settings = LevyWalkSettings::from_toml_str(
            r#"
            nrof_map_files = 2
            map_files = ["roads.wkt", "rails.wkt"]
            ok_maps = [2]
            min_path_length = 3
            max_path_length = 30
            lambda = 1.5
            permissible_error = 45.0
            back_allowed = true
            world_size = [100.0, 200.0]
            speed = [1.0, 2.0]
            rng_seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(settings.ok_maps, Some(vec![2]));
        assert_eq!(settings.rng_seed, Some(42));
        assert_eq!(
            settings.walk_options(),
            WalkOptions {
                lambda: 1.5,
                min_path_length: 3,
                max_path_length: Some(30),
                permissible_error: 45.0,
                back_allowed: true,
            }
        );
        assert_eq!(settings.world_size(), (100.0, 200.0));
    }

    #[test]
    fn test_invalid_settings() {
        let cases = [
            ("nrof_map_files = 0\nmap_files = []", "nrof_map_files"),
            ("nrof_map_files = 2\nmap_files = [\"a\"]", "map_files"),
            ("nrof_map_files = 1\nmap_files = [\"a\"]\nok_maps = [2]", "ok_maps"),
            ("nrof_map_files = 1\nmap_files = [\"a\"]\nok_maps = []", "ok_maps"),
            ("nrof_map_files = 1\nmap_files = [\"a\"]\nlambda = 0.0", "lambda"),
            ("nrof_map_files = 1\nmap_files = [\"a\"]\nmin_path_length = 0", "min_path_length"),
            ("nrof_map_files = 1\nmap_files = [\"a\"]\nmax_path_length = 5", "max_path_length"),
            (
                "nrof_map_files = 1\nmap_files = [\"a\"]\npermissible_error = 0.0",
                "permissible_error",
            ),
            ("nrof_map_files = 1\nmap_files = [\"a\"]\nworld_size = [0.0, 10.0]", "world_size"),
            ("nrof_map_files = 1\nmap_files = [\"a\"]\nspeed = [2.0, 1.0]", "speed"),
        ];
        for (content, expected) in cases {
            match LevyWalkSettings::from_toml_str(content) {
                Err(Error::Configuration { setting, .. }) => assert_eq!(setting, expected),
                other => panic!("expected an error on {}, got {:?}", expected, other),
            }
        }

        assert!(matches!(
            LevyWalkSettings::from_toml_str("nrof_map_files = \"one\""),
            Err(Error::Settings(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "nrof_map_files = 1").unwrap();
        writeln!(file, "map_files = [\"roads.wkt\"]").unwrap();
        writeln!(file, "rng_seed = 7").unwrap();

        let settings = LevyWalkSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.rng_seed, Some(7));

        let mut a = settings.random_source();
        let mut b = settings.random_source();
        assert_eq!(a.gen_f64(), b.gen_f64());

        assert!(matches!(
            LevyWalkSettings::from_file(file.path().with_extension("missing")),
            Err(Error::Load { .. })
        ));
    }
}
