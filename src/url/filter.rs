use regex::Regex;

/// Include/exclude URL filter
///
/// Compiled once from the configured pattern lists, then evaluated against
/// the full string form of every candidate URL. Patterns are unanchored, so
/// "/docs" matches anywhere in the URL.
///
/// Decision procedure:
///
/// 1. Any exclude match rejects the URL.
/// 2. Otherwise any include match accepts it.
/// 3. Otherwise a non-empty include list rejects it.
/// 4. Otherwise the URL is accepted.
#[derive(Debug, Default)]
pub struct UrlFilter {
    include: Vec<Regex>,
    exclude: Vec<Regex>,
}

impl UrlFilter {
    /// Compiles the include and exclude pattern lists
    ///
    /// # Arguments
    ///
    /// * `include` - Patterns a URL must match when the list is non-empty
    /// * `exclude` - Patterns that reject a URL outright
    ///
    /// # Returns
    ///
    /// * `Ok(UrlFilter)` - All patterns compiled
    /// * `Err(regex::Error)` - A pattern failed to compile
    pub fn compile(include: &[String], exclude: &[String]) -> Result<Self, regex::Error> {
        Ok(Self {
            include: compile_patterns(include)?,
            exclude: compile_patterns(exclude)?,
        })
    }

    /// Decides whether a URL may be crawled
    pub fn allows(&self, full_url: &str) -> bool {
        // 1. Exclude rules win.
        if self.exclude.iter().any(|r| r.is_match(full_url)) {
            return false;
        }

        // 2. An include match accepts.
        if self.include.iter().any(|r| r.is_match(full_url)) {
            return true;
        }

        // 3. With include rules present, anything unmatched is rejected.
        //    Without them, everything not excluded is accepted.
        self.include.is_empty()
    }
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| Regex::new(p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &[&str], exclude: &[&str]) -> UrlFilter {
        let include: Vec<String> = include.iter().map(|s| s.to_string()).collect();
        let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();
        UrlFilter::compile(&include, &exclude).unwrap()
    }

    #[test]
    fn test_empty_filter_allows_everything() {
        let f = filter(&[], &[]);
        assert!(f.allows("https://example.com/"));
        assert!(f.allows("https://example.com/anything?q=1"));
    }

    #[test]
    fn test_exclude_rejects() {
        let f = filter(&[], &["/private"]);
        assert!(f.allows("https://example.com/public"));
        assert!(!f.allows("https://example.com/private"));
        assert!(!f.allows("https://example.com/private/page"));
    }

    #[test]
    fn test_include_restricts() {
        let f = filter(&["/docs"], &[]);
        assert!(f.allows("https://example.com/docs/intro"));
        assert!(!f.allows("https://example.com/blog/post"));
    }

    #[test]
    fn test_exclude_beats_include() {
        let f = filter(&["/keep", "/skip"], &["/skip"]);
        assert!(f.allows("https://example.com/keep"));
        assert!(!f.allows("https://example.com/skip"));
    }

    #[test]
    fn test_patterns_are_unanchored() {
        let f = filter(&["docs"], &[]);
        assert!(f.allows("https://example.com/en/docs/intro"));
        assert!(f.allows("https://docs.example.com/"));
    }

    #[test]
    fn test_regex_syntax() {
        let f = filter(&[], &[r"\.pdf$"]);
        assert!(!f.allows("https://example.com/report.pdf"));
        assert!(f.allows("https://example.com/report.pdf.html"));
    }

    #[test]
    fn test_bad_pattern_is_an_error() {
        let patterns = vec!["([unclosed".to_string()];
        assert!(UrlFilter::compile(&patterns, &[]).is_err());
    }
}
