// Text measurement for the PDF templates: WinAnsi mapping, Helvetica widths,
// jsPDF-compatible word wrapping and URL display forms.

pub mod encoding;
pub mod font_metrics;
pub mod urls;
pub mod wrap;
