/// Viewer configuration
///
/// There is no config file. Everything starts from `Default` and can be
/// overridden on the command line:
///
/// ```text
/// filmstrip-viewer [--unsorted] [--preload N] [--max-dimension PX] [FOLDER]
/// ```
use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Extensions recognised when none are configured
pub const DEFAULT_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "gif"];

/// Images decoded ahead on each side of the focused one
pub const DEFAULT_PRELOAD_RADIUS: usize = 2;

/// Longest side kept after decoding; larger images are downscaled
pub const DEFAULT_MAX_DIMENSION: u32 = 2560;

/// Case-insensitive set of file extensions (stored lowercase, without dot)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet(BTreeSet<String>);

impl ExtensionSet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            extensions
                .into_iter()
                .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
                .filter(|ext| !ext.is_empty())
                .collect(),
        )
    }

    /// Whether the file name ends in `.<ext>` for some extension in the set.
    /// A bare `.png` counts as a png.
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        let name = name.to_string_lossy().to_lowercase();

        self.0.iter().any(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSIONS)
    }
}

/// Order of images in a scanned folder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Lexicographic by file name
    #[default]
    Name,
    /// Whatever the directory listing yields
    Unsorted,
}

/// Everything the scanner needs to know
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    pub extensions: ExtensionSet,
    pub sort: SortOrder,
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub scan: ScanOptions,
    pub preload_radius: usize,
    pub max_dimension: u32,
    pub window_size: (f32, f32),
    /// Folder to open at start-up; the picker is shown when absent
    pub initial_folder: Option<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scan: ScanOptions::default(),
            preload_radius: DEFAULT_PRELOAD_RADIUS,
            max_dimension: DEFAULT_MAX_DIMENSION,
            window_size: (800.0, 600.0),
            initial_folder: None,
        }
    }
}

impl ViewerConfig {
    /// Build the configuration from the process arguments
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_args(pico_args::Arguments::from_env())
    }

    /// Build the configuration from an explicit argument list (without program name)
    pub fn from_vec(args: Vec<OsString>) -> Result<Self, ConfigError> {
        Self::from_args(pico_args::Arguments::from_vec(args))
    }

    fn from_args(mut args: pico_args::Arguments) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if args.contains("--unsorted") {
            config.scan.sort = SortOrder::Unsorted;
        }

        if let Some(radius) = args.opt_value_from_str::<_, usize>("--preload")? {
            config.preload_radius = radius;
        }

        if let Some(max) = args.opt_value_from_str::<_, u32>("--max-dimension")? {
            if max == 0 {
                return Err(ConfigError::Zero {
                    flag: "--max-dimension",
                });
            }
            config.max_dimension = max;
        }

        let mut rest = args.finish().into_iter();
        config.initial_folder = rest.next().map(PathBuf::from);
        if let Some(extra) = rest.next() {
            return Err(ConfigError::Unexpected(extra.to_string_lossy().into_owned()));
        }

        Ok(config)
    }

    /// Directory the folder picker opens in
    pub fn picker_directory(&self) -> Option<PathBuf> {
        dirs::picture_dir().or_else(dirs::home_dir)
    }
}
