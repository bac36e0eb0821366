//! Include path normalization
//!
//! Keil stores include paths relative to the project file with Windows
//! separators (`..\drv\inc`). The editor resolves them against the
//! workspace root, so separators are unified and leading parent
//! references are dropped.

/// Prefix stripped from the front of every include path
const PARENT_PREFIX: &str = "../";

/// Normalize a Keil include path.
///
/// Converts every `\` to `/`, then strips ALL leading `../` segments.
/// Nothing else is touched: case, repeated slashes and a lone `..`
/// survive as-is.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");

    let mut rest = unified.as_str();
    while let Some(stripped) = rest.strip_prefix(PARENT_PREFIX) {
        rest = stripped;
    }

    rest.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backslashes_become_slashes() {
        assert_eq!(normalize_path(r"Core\Inc"), "Core/Inc");
        assert_eq!(normalize_path(r"a\b\c\d"), "a/b/c/d");
    }

    #[test]
    fn test_strips_single_parent() {
        assert_eq!(normalize_path(r"..\inc"), "inc");
        assert_eq!(normalize_path("../inc"), "inc");
    }

    #[test]
    fn test_strips_all_leading_parents() {
        assert_eq!(normalize_path(r"..\..\..\Drivers\CMSIS\Include"), "Drivers/CMSIS/Include");
        assert_eq!(normalize_path(r"../..\mixed/inc"), "mixed/inc");
    }

    #[test]
    fn test_inner_parents_are_kept() {
        assert_eq!(normalize_path(r"src\..\inc"), "src/../inc");
        assert_eq!(normalize_path(r".\..\inc"), "./../inc");
    }

    #[test]
    fn test_no_other_transformation() {
        assert_eq!(normalize_path("Drivers//HAL"), "Drivers//HAL");
        assert_eq!(normalize_path("CamelCase/Inc"), "CamelCase/Inc");
        assert_eq!(normalize_path(".."), "..");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            r"..\..\Middlewares\Third_Party\FreeRTOS",
            "../inc",
            r"C:\Keil_v5\ARM\INC",
            "plain",
            "../../",
        ];
        for input in inputs {
            let once = normalize_path(input);
            assert_eq!(normalize_path(&once), once, "input: {}", input);
        }
    }

    #[test]
    fn test_strips_exactly_n_components() {
        for n in 0..5 {
            let input = format!("{}board\\bsp\\inc", r"..\".repeat(n));
            let out = normalize_path(&input);
            assert_eq!(out, "board/bsp/inc");
            assert!(!out.starts_with("../"));
            assert_eq!(
                input.replace('\\', "/").split('/').count() - n,
                out.split('/').count()
            );
        }
    }

    #[test]
    fn test_absolute_paths_only_change_separators() {
        assert_eq!(normalize_path(r"C:\Keil_v5\ARM\INC"), "C:/Keil_v5/ARM/INC");
        assert_eq!(normalize_path("/opt/arm/include"), "/opt/arm/include");
    }
}
