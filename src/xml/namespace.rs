//! WordprocessingML names touched by placeholder substitution

/// WordprocessingML main namespace
pub const W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Paragraph
pub const W_P: &str = "w:p";
/// Paragraph properties
pub const W_PPR: &str = "w:pPr";
/// Run
pub const W_R: &str = "w:r";
/// Run properties
pub const W_RPR: &str = "w:rPr";
/// Text
pub const W_T: &str = "w:t";
/// Line break
pub const W_BR: &str = "w:br";

/// Whitespace handling attribute
pub const XML_SPACE: &str = "xml:space";
