use log::debug;

/// One call path from a folded-stack trace: the ordered frame labels of a
/// single line, root first. The last label normally carries a trailing
/// time value; extracting it is the tree builder's job.
pub type CallPath = Vec<String>;

/// Parse folded-stack trace text into one `CallPath` per non-blank line.
///
/// Each line has the format `frame;frame;...;frame <time>`. Segments that
/// denote execution contexts rather than call frames (`Thread:` / `Fiber:`
/// prefixes) are dropped individually; the rest of the line survives.
/// No validation happens here: a line whose last segment carries no time
/// value still becomes a `CallPath` and is rejected during tree building.
pub fn parse_folded(text: &str) -> Vec<CallPath> {
    let mut paths = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut segments: CallPath = Vec::new();
        for segment in line.split(';') {
            let segment = segment.trim_end();
            if segment.starts_with("Thread:") || segment.starts_with("Fiber:") {
                debug!("dropping execution-context segment {segment:?}");
                continue;
            }
            segments.push(segment.to_string());
        }

        paths.push(segments);
    }

    paths
}
