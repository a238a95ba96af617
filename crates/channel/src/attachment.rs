//! Attachment classification, decoupled from staging.

/// A file attached to an inbound message.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Download URL exposed by the chat platform.
    pub url: String,
}

/// What the pipeline can do with an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentKind {
    /// A single source file the syntax checker can build.
    SourceFile,
    /// A source archive. Recognized, but not processed.
    Archive,
    Unsupported,
}

/// Classify an attachment by the file extension of its URL.
///
/// Matching is case-insensitive; query strings and fragments are ignored.
#[must_use]
pub fn classify(url: &str) -> AttachmentKind {
    match extension(url).as_deref() {
        Some("c" | "cpp") => AttachmentKind::SourceFile,
        Some("zip") => AttachmentKind::Archive,
        _ => AttachmentKind::Unsupported,
    }
}

/// Pick the attachment a submission acts on.
///
/// The first source file wins, then the first archive; anything else is
/// reported as the first attachment, unsupported.
#[must_use]
pub fn select(attachments: &[Attachment]) -> Option<(&Attachment, AttachmentKind)> {
    if let Some(source) = attachments
        .iter()
        .find(|a| classify(&a.url) == AttachmentKind::SourceFile)
    {
        return Some((source, AttachmentKind::SourceFile));
    }
    if let Some(archive) = attachments
        .iter()
        .find(|a| classify(&a.url) == AttachmentKind::Archive)
    {
        return Some((archive, AttachmentKind::Archive));
    }
    attachments
        .first()
        .map(|a| (a, AttachmentKind::Unsupported))
}

fn extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let name = path.rsplit('/').next().unwrap_or(path);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use {super::*, rstest::rstest};

    #[rstest]
    #[case("https://cdn.example.com/uploads/main.cpp", AttachmentKind::SourceFile)]
    #[case("https://cdn.example.com/uploads/main.c", AttachmentKind::SourceFile)]
    #[case("https://cdn.example.com/uploads/MAIN.CPP", AttachmentKind::SourceFile)]
    #[case("https://cdn.example.com/uploads/main.cpp?ex=651&hm=abc", AttachmentKind::SourceFile)]
    #[case("https://cdn.example.com/uploads/src.zip", AttachmentKind::Archive)]
    #[case("https://cdn.example.com/uploads/SRC.ZIP", AttachmentKind::Archive)]
    #[case("https://cdn.example.com/uploads/notes.txt", AttachmentKind::Unsupported)]
    #[case("https://cdn.example.com/uploads/binary", AttachmentKind::Unsupported)]
    #[case("https://cdn.example.com/uploads/.gitignore", AttachmentKind::Unsupported)]
    #[case("https://cdn.example.com/uploads/archive.cpp.zip", AttachmentKind::Archive)]
    fn classifies_by_extension(#[case] url: &str, #[case] expected: AttachmentKind) {
        assert_eq!(classify(url), expected);
    }

    #[test]
    fn query_string_extension_is_not_trusted() {
        assert_eq!(
            classify("https://cdn.example.com/uploads/notes.txt?name=main.cpp"),
            AttachmentKind::Unsupported
        );
    }

    fn attachments(urls: &[&str]) -> Vec<Attachment> {
        urls.iter()
            .map(|url| Attachment {
                url: (*url).to_string(),
            })
            .collect()
    }

    #[test]
    fn select_prefers_a_source_file_over_other_attachments() {
        let list = attachments(&["https://h/notes.txt", "https://h/main.cpp", "https://h/a.zip"]);
        let (attachment, kind) = select(&list).unwrap();
        assert_eq!(attachment.url, "https://h/main.cpp");
        assert_eq!(kind, AttachmentKind::SourceFile);
    }

    #[test]
    fn select_falls_back_to_an_archive() {
        let list = attachments(&["https://h/notes.txt", "https://h/src.zip"]);
        let (attachment, kind) = select(&list).unwrap();
        assert_eq!(attachment.url, "https://h/src.zip");
        assert_eq!(kind, AttachmentKind::Archive);
    }

    #[test]
    fn select_reports_the_first_attachment_when_nothing_matches() {
        let list = attachments(&["https://h/notes.txt", "https://h/image.png"]);
        let (attachment, kind) = select(&list).unwrap();
        assert_eq!(attachment.url, "https://h/notes.txt");
        assert_eq!(kind, AttachmentKind::Unsupported);
    }

    #[test]
    fn select_with_no_attachments_is_none() {
        assert!(select(&[]).is_none());
    }
}
