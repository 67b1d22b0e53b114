use docsearch_core::{resolve_query, AcquireError, QueryOrigin};

fn unreachable_clipboard() -> Result<Option<String>, String> {
    panic!("clipboard must not be read when a selection exists")
}

#[test]
fn selection_wins_over_clipboard() {
    let acquired = resolve_query(Ok(Some(" selected text ".into())), unreachable_clipboard).unwrap();
    assert_eq!(acquired.query.as_str(), "selected text");
    assert_eq!(acquired.origin, QueryOrigin::Selection);
}

#[test]
fn selection_error_falls_back_to_clipboard() {
    let acquired = resolve_query(Err("no primary selection".to_string()), || {
        Ok(Some("clipboard text".into()))
    })
    .unwrap();
    assert_eq!(acquired.query.as_str(), "clipboard text");
    assert_eq!(acquired.origin, QueryOrigin::Clipboard);
}

#[test]
fn blank_selection_counts_as_none() {
    let acquired =
        resolve_query(Ok(Some("  \n".into())), || Ok::<_, String>(Some("from clipboard".into())))
            .unwrap();
    assert_eq!(acquired.origin, QueryOrigin::Clipboard);
}

#[test]
fn empty_clipboard_is_nothing_available() {
    let err = resolve_query(Ok(None), || Ok::<_, String>(Some("   ".into()))).unwrap_err();
    assert_eq!(err, AcquireError::NothingAvailable);
    assert_eq!(err.title(), "No text available");
    assert_eq!(
        err.hint(),
        "Please select or copy text to search in GitHub docs"
    );

    let err = resolve_query(Ok(None), || Ok::<_, String>(None)).unwrap_err();
    assert_eq!(err, AcquireError::NothingAvailable);
}

#[test]
fn clipboard_error_is_reported() {
    let err = resolve_query(Ok(None), || Err("display server unavailable".to_string())).unwrap_err();
    assert_eq!(
        err,
        AcquireError::ClipboardUnavailable("display server unavailable".into())
    );
    assert_eq!(err.title(), "Could not access clipboard");
}
