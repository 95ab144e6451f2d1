use std::path::PathBuf;

use serde::Deserialize;

/// Default base tag for directives (`+k8s:deepcopy-gen=...`).
pub const DEFAULT_TAG: &str = "k8s:deepcopy-gen";

/// Default generated file name, without the `.go` extension.
pub const DEFAULT_OUTPUT_FILE_BASE: &str = "zz_generated.deepcopy";

/// Default build tag that excludes generated files from hand-written builds.
pub const DEFAULT_BUILD_TAG: &str = "ignore_autogenerated";

/// Generator configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratorConfig {
    /// Base tag used to recognise directives in comments
    #[serde(default = "default_tag")]
    pub tag: String,

    /// Name of the generated file in each package directory
    #[serde(default = "default_output_file_base")]
    pub output_file_base: String,

    /// Build tag negated at the top of every generated file
    #[serde(default = "default_build_tag")]
    pub build_tag: String,

    /// File whose content is placed after the build tags
    pub boilerplate: Option<PathBuf>,

    /// Package roots whose structs may be copied via `DeepCopyInto`.
    /// Defaults to the input packages.
    #[serde(default)]
    pub bounding_dirs: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            tag: default_tag(),
            output_file_base: default_output_file_base(),
            build_tag: default_build_tag(),
            boilerplate: None,
            bounding_dirs: Vec::new(),
        }
    }
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

fn default_output_file_base() -> String {
    DEFAULT_OUTPUT_FILE_BASE.to_string()
}

fn default_build_tag() -> String {
    DEFAULT_BUILD_TAG.to_string()
}
