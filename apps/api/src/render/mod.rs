// Resume Preview Renderer — pure `ResumeData` → HTML mapping.
//
// Output is the `#resume-preview` fragment that the editor shows live, the
// printable page wraps, and the dispatcher embeds in application emails.

use askama::Template;

use crate::models::resume::ResumeData;

/// Printed in place of an empty name.
pub const NAME_PLACEHOLDER: &str = "Your Name";

#[derive(Template)]
#[template(path = "preview.html")]
struct PreviewFragment<'a> {
    name: &'a str,
    contacts: Vec<&'a str>,
    resume: &'a ResumeData,
}

#[derive(Template)]
#[template(path = "preview_page.html")]
struct PreviewPage<'a> {
    title: &'a str,
    preview: &'a str,
}

/// Renders the preview fragment. Deterministic for a given input.
pub fn render_preview(resume: &ResumeData) -> Result<String, askama::Error> {
    let name = if resume.full_name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        resume.full_name.as_str()
    };

    PreviewFragment {
        name,
        contacts: contact_items(resume),
        resume,
    }
    .render()
}

/// Renders a standalone, printable HTML document around the fragment.
pub fn render_preview_page(resume: &ResumeData) -> Result<String, askama::Error> {
    let preview = render_preview(resume)?;
    let title = if resume.full_name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        resume.full_name.as_str()
    };

    PreviewPage {
        title,
        preview: &preview,
    }
    .render()
}

/// Non-empty contact details in fixed order: email, phone, location.
fn contact_items(resume: &ResumeData) -> Vec<&str> {
    [
        resume.email.as_str(),
        resume.phone.as_str(),
        resume.location.as_str(),
    ]
    .into_iter()
    .filter(|item| !item.is_empty())
    .collect()
}
