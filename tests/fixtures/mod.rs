//! Test fixtures for end-to-end sync tests
//!
//! Builds throwaway Keil source trees with a `.uvprojx` descriptor shaped
//! like the ones uVision 5 writes.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary Keil source tree
pub struct KeilTree {
    dir: TempDir,
}

impl Default for KeilTree {
    fn default() -> Self {
        Self::new()
    }
}

impl KeilTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn vscode_dir(&self) -> PathBuf {
        self.root().join(".vscode")
    }

    pub fn document_path(&self) -> PathBuf {
        self.vscode_dir().join("c_cpp_properties.json")
    }

    /// Write a project file at `rel` with the given `<Cads>` body
    pub fn add_project(&self, rel: &str, cads: Option<&str>) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, uvprojx(cads)).unwrap();
        path
    }

    /// Write a raw file at `rel`
    pub fn add_file(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    pub fn read_document(&self) -> serde_json::Value {
        serde_json::from_str(&fs::read_to_string(self.document_path()).unwrap()).unwrap()
    }
}

/// `<Cads>` body with the given include path and define texts
pub fn cads(include_path: &str, define: &str) -> String {
    format!(
        "<Cads><VariousControls><MiscControls></MiscControls>\
         <Define>{define}</Define><Undefine></Undefine>\
         <IncludePath>{include_path}</IncludePath></VariousControls></Cads>"
    )
}

/// A uVision 5 project; `cads` of `None` leaves the compiler node out
pub fn uvprojx(cads: Option<&str>) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no" ?>
<Project xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:noNamespaceSchemaLocation="project_projx.xsd">
  <SchemaVersion>2.1</SchemaVersion>
  <Header>### uVision Project, (C) Keil Software</Header>
  <Targets>
    <Target>
      <TargetName>Debug</TargetName>
      <ToolsetNumber>0x4</ToolsetNumber>
      <ToolsetName>ARM-ADS</ToolsetName>
      <TargetOption>
        <TargetArmAds>
          <ArmAdsMisc>
            <useUlib>1</useUlib>
          </ArmAdsMisc>
          {cads}
          <Aads>
            <interw>1</interw>
            <VariousControls>
              <MiscControls></MiscControls>
              <Define>__ASM_ONLY</Define>
              <IncludePath>..\startup</IncludePath>
            </VariousControls>
          </Aads>
        </TargetArmAds>
      </TargetOption>
    </Target>
  </Targets>
</Project>
"#,
        cads = cads.unwrap_or("")
    )
}
