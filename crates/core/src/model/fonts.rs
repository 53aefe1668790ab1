//! Font definition table and current-font tracking.

use std::collections::HashMap;

/// Metadata carried by a font-definition opcode.
///
/// A given font id is defined at most once per document (the postamble may
/// repeat a definition verbatim as a cross-check). The checksum refers to
/// the font's metrics file and is not verified here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDefinition {
    /// Font number used by selection opcodes.
    pub id: i32,
    /// Checksum of the font's metrics file.
    pub checksum: u32,
    /// Fixed-point scale factor applied to character widths.
    pub scale_factor: u32,
    /// Design size the font was created at, same fixed-point units.
    pub design_size: u32,
    /// Directory part of the font name (empty means the default search path).
    pub directory: String,
    /// The font's name proper, e.g. "cmr10".
    pub name: String,
}

impl std::fmt::Display for FontDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.directory.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}", self.directory, self.name)
        }
    }
}

/// Mapping from font id to definition, plus the currently selected font.
///
/// The current font is deliberately not part of the register file: push and
/// pop do not save or restore it. Begin-page clears it.
#[derive(Debug, Default)]
pub struct FontTable {
    fonts: HashMap<i32, FontDefinition>,
    current: Option<i32>,
}

impl FontTable {
    /// True if `id` has been defined.
    pub fn contains(&self, id: i32) -> bool {
        self.fonts.contains_key(&id)
    }

    /// Look up a definition by id.
    pub fn get(&self, id: i32) -> Option<&FontDefinition> {
        self.fonts.get(&id)
    }

    /// Record a definition. The interpreter enforces the no-redefinition
    /// discipline before calling this.
    pub fn insert(&mut self, def: FontDefinition) {
        self.fonts.insert(def.id, def);
    }

    /// Make `id` the current font. Returns false if `id` is undefined, in
    /// which case the current font is left unchanged.
    pub fn select(&mut self, id: i32) -> bool {
        if self.fonts.contains_key(&id) {
            self.current = Some(id);
            true
        } else {
            false
        }
    }

    /// The currently selected font id, if any.
    pub fn current(&self) -> Option<i32> {
        self.current
    }

    /// Forget the current selection. Invoked on begin-page.
    pub fn clear_current(&mut self) {
        self.current = None;
    }

    /// Number of defined fonts.
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    /// True when no font has been defined.
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Iterate over all definitions in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &FontDefinition> {
        self.fonts.values()
    }
}
