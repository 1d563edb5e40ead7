//! Closed set of known option names, each bound to its kind
//!
//! Names generated at runtime (per-action keyboard shortcuts) are not listed
//! here and are accessed through the untyped string API of the store.

use super::types::OptionKind;
use std::fmt;
use std::str::FromStr;

macro_rules! option_names {
    ($( $variant:ident => ($key:literal, $kind:ident) ),* $(,)?) => {
        /// A known option, bound at compile time to its semantic kind
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum OptionName {
            $( $variant, )*
        }

        impl OptionName {
            /// Every known option name
            pub const ALL: &'static [OptionName] = &[ $( OptionName::$variant, )* ];

            /// Persisted key
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( OptionName::$variant => $key, )*
                }
            }

            pub fn kind(&self) -> OptionKind {
                match self {
                    $( OptionName::$variant => OptionKind::$kind, )*
                }
            }
        }
    };
}

option_names! {
    // Instance identity and bootstrap state
    DocumentId => ("documentId", Text),
    DocumentSecret => ("documentSecret", Text),
    Initialized => ("initialized", Bool),
    OpenNoteContexts => ("openNoteContexts", Text),
    LastDailyBackupDate => ("lastDailyBackupDate", Text),
    LastWeeklyBackupDate => ("lastWeeklyBackupDate", Text),
    LastMonthlyBackupDate => ("lastMonthlyBackupDate", Text),
    Theme => ("theme", Text),

    // Sync endpoint
    SyncServerHost => ("syncServerHost", Text),
    SyncServerTimeout => ("syncServerTimeout", Int),
    SyncProxy => ("syncProxy", Text),
    LastSyncedPull => ("lastSyncedPull", Int),
    LastSyncedPush => ("lastSyncedPush", Int),

    // Notes and revisions
    RevisionSnapshotTimeInterval => ("revisionSnapshotTimeInterval", Int),
    RevisionSnapshotNumberLimit => ("revisionSnapshotNumberLimit", Int),
    ProtectedSessionTimeout => ("protectedSessionTimeout", Int),
    EraseEntitiesAfterTimeInSeconds => ("eraseEntitiesAfterTimeInSeconds", Int),
    EraseUnusedAttachmentsAfterSeconds => ("eraseUnusedAttachmentsAfterSeconds", Int),
    AutoFixConsistencyIssues => ("autoFixConsistencyIssues", Bool),
    AutoReadonlySizeText => ("autoReadonlySizeText", Int),
    AutoReadonlySizeCode => ("autoReadonlySizeCode", Int),

    // Appearance
    ZoomFactor => ("zoomFactor", Text),
    OverrideThemeFonts => ("overrideThemeFonts", Bool),
    MainFontFamily => ("mainFontFamily", Text),
    MainFontSize => ("mainFontSize", Int),
    TreeFontFamily => ("treeFontFamily", Text),
    TreeFontSize => ("treeFontSize", Int),
    DetailFontFamily => ("detailFontFamily", Text),
    DetailFontSize => ("detailFontSize", Int),
    MonospaceFontFamily => ("monospaceFontFamily", Text),
    MonospaceFontSize => ("monospaceFontSize", Int),
    HeadingStyle => ("headingStyle", Text),
    MaxContentWidth => ("maxContentWidth", Int),
    NativeTitleBarVisible => ("nativeTitleBarVisible", Bool),
    BackgroundEffects => ("backgroundEffects", Bool),
    CodeBlockTheme => ("codeBlockTheme", Text),
    CodeBlockWordWrap => ("codeBlockWordWrap", Bool),

    // Layout
    LeftPaneWidth => ("leftPaneWidth", Int),
    LeftPaneVisible => ("leftPaneVisible", Bool),
    RightPaneWidth => ("rightPaneWidth", Int),
    RightPaneVisible => ("rightPaneVisible", Bool),
    PromotedAttributesOpenInRibbon => ("promotedAttributesOpenInRibbon", Bool),
    EditedNotesOpenInRibbon => ("editedNotesOpenInRibbon", Bool),
    MinTocHeadings => ("minTocHeadings", Int),
    HighlightsList => ("highlightsList", Text),

    // Editing
    SpellCheckEnabled => ("spellCheckEnabled", Bool),
    SpellCheckLanguageCode => ("spellCheckLanguageCode", Text),
    VimKeymapEnabled => ("vimKeymapEnabled", Bool),
    CodeLineWrapEnabled => ("codeLineWrapEnabled", Bool),
    CodeNotesMimeTypes => ("codeNotesMimeTypes", Text),
    TextNoteEditorType => ("textNoteEditorType", Text),
    TextNoteEditorMultilineToolbar => ("textNoteEditorMultilineToolbar", Bool),

    // Images
    ImageMaxWidthHeight => ("imageMaxWidthHeight", Int),
    ImageJpegQuality => ("imageJpegQuality", Int),
    CompressImages => ("compressImages", Bool),
    DownloadImagesAutomatically => ("downloadImagesAutomatically", Bool),

    // Backups
    DailyBackupEnabled => ("dailyBackupEnabled", Bool),
    WeeklyBackupEnabled => ("weeklyBackupEnabled", Bool),
    MonthlyBackupEnabled => ("monthlyBackupEnabled", Bool),

    // Locale and search
    Locale => ("locale", Text),
    FormattingLocale => ("formattingLocale", Text),
    FirstDayOfWeek => ("firstDayOfWeek", Int),
    CustomSearchEngineName => ("customSearchEngineName", Text),
    CustomSearchEngineUrl => ("customSearchEngineUrl", Text),

    // Application
    DebugModeEnabled => ("debugModeEnabled", Bool),
    CheckForUpdates => ("checkForUpdates", Bool),
    DisableTray => ("disableTray", Bool),
}

impl fmt::Display for OptionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for OptionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for OptionName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionName::ALL
            .iter()
            .copied()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown option name: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<_> = OptionName::ALL.iter().map(|n| n.as_str()).collect();
        assert_eq!(keys.len(), OptionName::ALL.len());
    }

    #[test]
    fn test_from_str_roundtrip() {
        for name in OptionName::ALL {
            assert_eq!(name.as_str().parse::<OptionName>().unwrap(), *name);
        }
        assert!("keyboardShortcutsBackInNoteHistory".parse::<OptionName>().is_err());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(OptionName::Theme.kind(), OptionKind::Text);
        assert_eq!(OptionName::LeftPaneWidth.kind(), OptionKind::Int);
        assert_eq!(OptionName::Initialized.kind(), OptionKind::Bool);
    }
}
