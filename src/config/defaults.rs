//! Built-in toolchain defaults (layer 1)

use serde::{Deserialize, Serialize};

/// Built-in values for the toolchain metadata of new entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Compiler the editor queries for system includes (default: "arm-none-eabi-gcc")
    pub compiler_path: String,

    /// IntelliSense mode (default: "linux-gcc-arm")
    pub intellisense_mode: String,

    /// C language standard (default: "c99")
    pub c_standard: String,

    /// C++ language standard (default: "c++11")
    pub cpp_standard: String,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        Self {
            compiler_path: "arm-none-eabi-gcc".to_string(),
            intellisense_mode: "linux-gcc-arm".to_string(),
            c_standard: "c99".to_string(),
            cpp_standard: "c++11".to_string(),
        }
    }
}

impl BuiltinDefaults {
    /// Convert to the layered settings shape for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "toolchain": {
                "compiler_path": self.compiler_path,
                "intellisense_mode": self.intellisense_mode,
                "c_standard": self.c_standard,
                "cpp_standard": self.cpp_standard
            }
        })
    }
}
