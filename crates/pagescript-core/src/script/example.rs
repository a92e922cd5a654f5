//! Built-in example scripts offered by the "choose an example" menu.

/// A statically supplied example script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptExample {
    pub title: &'static str,
    pub script: &'static str,
}

/// Examples in menu order.
pub static BUILTIN_EXAMPLES: [ScriptExample; 6] = [
    ScriptExample {
        title: "Page title",
        script: "alert(document.title);",
    },
    ScriptExample {
        title: "Page URL",
        script: "alert(document.URL);",
    },
    ScriptExample {
        title: "Word count",
        script: "alert(document.body.innerText.split(/\\s+/).filter(Boolean).length + ' words');",
    },
    ScriptExample {
        title: "Highlight links",
        script: "document.querySelectorAll('a').forEach(a => a.style.background = 'yellow');",
    },
    ScriptExample {
        title: "Dark background",
        script: "document.body.style.background = '#111'; document.body.style.color = '#eee';",
    },
    ScriptExample {
        title: "Remove images",
        script: "document.querySelectorAll('img').forEach(img => img.remove());",
    },
];

impl ScriptExample {
    /// Looks up a built-in example by menu position.
    pub fn get(index: usize) -> Option<&'static ScriptExample> {
        BUILTIN_EXAMPLES.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles_are_unique() {
        let mut titles: Vec<_> = BUILTIN_EXAMPLES.iter().map(|e| e.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), BUILTIN_EXAMPLES.len());
    }

    #[test]
    fn test_get_by_index() {
        assert_eq!(ScriptExample::get(0).unwrap().title, "Page title");
        assert!(ScriptExample::get(BUILTIN_EXAMPLES.len()).is_none());
    }
}
