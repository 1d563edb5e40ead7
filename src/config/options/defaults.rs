//! Declarative table of default options
//!
//! A default is either a literal or derived from the option snapshot taken
//! when startup defaulting begins. Derived defaults may only read options
//! created during bootstrap (such as `theme`), never other derived defaults.

use super::entity::OptionMap;
use super::names::OptionName;
use std::fmt;

/// How a default value is obtained
#[derive(Clone)]
pub enum DefaultValue {
    Literal(String),
    Derived(fn(&OptionMap) -> String),
}

impl DefaultValue {
    /// Resolve against the snapshot; derived results are used as-is
    pub fn resolve(&self, options: &OptionMap) -> String {
        match self {
            DefaultValue::Literal(value) => value.clone(),
            DefaultValue::Derived(derive) => derive(options),
        }
    }

    pub fn as_literal(&self) -> Option<&str> {
        match self {
            DefaultValue::Literal(value) => Some(value),
            DefaultValue::Derived(_) => None,
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultValue::Derived(_) => f.write_str("Derived(..)"),
        }
    }
}

/// One row of the default table
#[derive(Debug, Clone)]
pub struct DefaultOption {
    pub name: String,
    pub value: DefaultValue,
    pub is_synced: bool,
}

impl DefaultOption {
    fn literal(name: OptionName, value: &str, is_synced: bool) -> Self {
        Self {
            name: name.as_str().to_string(),
            value: DefaultValue::Literal(value.to_string()),
            is_synced,
        }
    }

    fn derived(name: OptionName, derive: fn(&OptionMap) -> String, is_synced: bool) -> Self {
        Self {
            name: name.as_str().to_string(),
            value: DefaultValue::Derived(derive),
            is_synced,
        }
    }
}

pub const CODE_BLOCK_THEME_LIGHT: &str = "default:stackoverflow-light";
pub const CODE_BLOCK_THEME_DARK: &str = "default:stackoverflow-dark";

/// Code block theme follows the UI theme; anything but `light` gets the dark variant
fn code_block_theme(options: &OptionMap) -> String {
    match options.get(OptionName::Theme.as_str()) {
        Some("light") => CODE_BLOCK_THEME_LIGHT.to_string(),
        _ => CODE_BLOCK_THEME_DARK.to_string(),
    }
}

fn zoom_factor() -> &'static str {
    if cfg!(target_os = "windows") { "0.9" } else { "1.0" }
}

const CODE_NOTES_MIME_TYPES: &str = r#"["text/x-csrc","text/x-c++src","text/x-csharp","text/css","text/x-go","text/x-groovy","text/x-haskell","text/html","message/http","text/x-java","application/javascript;env=frontend","application/javascript;env=backend","application/json","text/x-kotlin","text/x-markdown","text/x-perl","text/x-php","text/x-python","text/x-ruby","text/x-rustsrc",null,"text/x-sql","text/x-sqlite;schema=trilium","text/x-swift","text/xml","text/x-yaml","text/x-sh"]"#;

const HIGHLIGHTS_LIST: &str = r#"["bold","italic","underline","color","bgColor"]"#;

/// Built-in defaults, excluding per-action keyboard shortcuts
pub fn default_options() -> Vec<DefaultOption> {
    use OptionName::*;

    vec![
        DefaultOption::literal(RevisionSnapshotTimeInterval, "600", true),
        DefaultOption::literal(RevisionSnapshotNumberLimit, "-1", true),
        DefaultOption::literal(ProtectedSessionTimeout, "600", true),
        DefaultOption::literal(ZoomFactor, zoom_factor(), false),
        DefaultOption::literal(OverrideThemeFonts, "false", false),
        DefaultOption::literal(MainFontFamily, "theme", false),
        DefaultOption::literal(MainFontSize, "100", false),
        DefaultOption::literal(TreeFontFamily, "theme", false),
        DefaultOption::literal(TreeFontSize, "100", false),
        DefaultOption::literal(DetailFontFamily, "theme", false),
        DefaultOption::literal(DetailFontSize, "110", false),
        DefaultOption::literal(MonospaceFontFamily, "theme", false),
        DefaultOption::literal(MonospaceFontSize, "110", false),
        DefaultOption::literal(SpellCheckEnabled, "true", false),
        DefaultOption::literal(SpellCheckLanguageCode, "en-US", false),
        DefaultOption::literal(ImageMaxWidthHeight, "2000", true),
        DefaultOption::literal(ImageJpegQuality, "75", true),
        DefaultOption::literal(AutoFixConsistencyIssues, "true", false),
        DefaultOption::literal(VimKeymapEnabled, "false", false),
        DefaultOption::literal(CodeLineWrapEnabled, "true", false),
        DefaultOption::literal(CodeNotesMimeTypes, CODE_NOTES_MIME_TYPES, true),
        DefaultOption::literal(LeftPaneWidth, "25", false),
        DefaultOption::literal(LeftPaneVisible, "true", false),
        DefaultOption::literal(RightPaneWidth, "25", false),
        DefaultOption::literal(RightPaneVisible, "true", false),
        DefaultOption::literal(NativeTitleBarVisible, "false", false),
        DefaultOption::literal(EraseEntitiesAfterTimeInSeconds, "604800", true),
        DefaultOption::literal(EraseUnusedAttachmentsAfterSeconds, "2592000", true),
        DefaultOption::literal(DebugModeEnabled, "false", false),
        DefaultOption::literal(HeadingStyle, "underline", true),
        DefaultOption::literal(AutoReadonlySizeText, "10000", false),
        DefaultOption::literal(AutoReadonlySizeCode, "30000", false),
        DefaultOption::literal(DailyBackupEnabled, "true", false),
        DefaultOption::literal(WeeklyBackupEnabled, "true", false),
        DefaultOption::literal(MonthlyBackupEnabled, "true", false),
        DefaultOption::literal(MaxContentWidth, "1200", false),
        DefaultOption::literal(CompressImages, "true", true),
        DefaultOption::literal(DownloadImagesAutomatically, "true", true),
        DefaultOption::literal(MinTocHeadings, "5", true),
        DefaultOption::literal(HighlightsList, HIGHLIGHTS_LIST, true),
        DefaultOption::literal(CheckForUpdates, "true", true),
        DefaultOption::literal(DisableTray, "false", false),
        DefaultOption::literal(CustomSearchEngineName, "DuckDuckGo", true),
        DefaultOption::literal(CustomSearchEngineUrl, "https://duckduckgo.com/?q={keyword}", true),
        DefaultOption::literal(PromotedAttributesOpenInRibbon, "true", true),
        DefaultOption::literal(EditedNotesOpenInRibbon, "true", true),
        DefaultOption::literal(Locale, "en", true),
        DefaultOption::literal(FormattingLocale, "", true),
        DefaultOption::literal(FirstDayOfWeek, "1", true),
        DefaultOption::derived(CodeBlockTheme, code_block_theme, false),
        DefaultOption::literal(CodeBlockWordWrap, "false", true),
        DefaultOption::literal(TextNoteEditorType, "ckeditor-balloon", true),
        DefaultOption::literal(TextNoteEditorMultilineToolbar, "false", true),
        DefaultOption::literal(BackgroundEffects, "false", false),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::types::OptionKind;
    use std::collections::HashSet;

    #[test]
    fn test_default_names_are_unique() {
        let defaults = default_options();
        let names: HashSet<_> = defaults.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names.len(), defaults.len());
    }

    #[test]
    fn test_literals_match_declared_kind() {
        for default in default_options() {
            let name: OptionName = default.name.parse().unwrap();
            if let Some(literal) = default.value.as_literal() {
                assert!(
                    name.kind().parse(&default.name, literal).is_ok(),
                    "{} default '{}' is not a valid {}",
                    default.name,
                    literal,
                    name.kind().label()
                );
            }
        }
    }

    #[test]
    fn test_code_block_theme_follows_theme() {
        let light: OptionMap = [("theme".to_string(), "light".to_string())].into_iter().collect();
        let dark: OptionMap = [("theme".to_string(), "dark".to_string())].into_iter().collect();

        let value = DefaultValue::Derived(code_block_theme);
        assert_eq!(value.resolve(&light), CODE_BLOCK_THEME_LIGHT);
        assert_eq!(value.resolve(&dark), CODE_BLOCK_THEME_DARK);
        assert_eq!(value.resolve(&OptionMap::default()), CODE_BLOCK_THEME_DARK);
    }

    #[test]
    fn test_table_does_not_shadow_bootstrap_options() {
        let bootstrap = [
            OptionName::Theme,
            OptionName::Initialized,
            OptionName::OpenNoteContexts,
            OptionName::DocumentId,
        ];
        for default in default_options() {
            assert!(bootstrap.iter().all(|b| b.as_str() != default.name));
        }
        assert_eq!(OptionName::CodeBlockTheme.kind(), OptionKind::Text);
    }
}
