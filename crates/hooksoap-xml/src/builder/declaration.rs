use crate::XmlError;

/// Represents an XML declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// The XML version.
    version: String,
    /// The encoding used for the XML document.
    encoding: Option<String>,
    /// The standalone status of the XML document (optional).
    standalone: Option<bool>,
}

impl Default for Declaration {
    fn default() -> Self {
        Self::new("1.0", "UTF-8")
    }
}

impl Declaration {
    /// Creates a new instance of `Declaration` with the given version and encoding.
    ///
    /// # Example
    ///
    /// ```
    /// use hooksoap_xml::builder::Declaration;
    /// let declaration = Declaration::new("1.0", "UTF-8");
    /// assert_eq!(declaration.to_string(), r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    /// ```
    pub fn new(version: impl Into<String>, encoding: impl Into<String>) -> Self {
        Declaration {
            version: version.into(),
            encoding: Some(encoding.into()),
            standalone: None,
        }
    }

    /// Sets the standalone status of the XML document and returns a modified `Declaration`.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = Some(standalone);
        self
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn encoding(&self) -> Option<&str> {
        self.encoding.as_deref()
    }

    pub fn standalone(&self) -> Option<bool> {
        self.standalone
    }

    /// Reads the declaration at the start of `xml`, if there is one.
    ///
    /// `roxmltree` validates the declaration but does not expose it, so the
    /// pseudo-attributes are picked up here.
    pub(crate) fn sniff(xml: &str) -> Result<Option<Self>, XmlError> {
        let xml = xml.trim_start_matches('\u{feff}').trim_start();
        let Some(rest) = xml.strip_prefix("<?xml") else {
            return Ok(None);
        };
        if !rest.starts_with(char::is_whitespace) {
            // `<?xml-stylesheet ...?>` and friends are processing instructions.
            return Ok(None);
        }
        let end = rest
            .find("?>")
            .ok_or_else(|| XmlError::InvalidDeclaration("unterminated declaration".to_owned()))?;
        let body = &rest[..end];

        let version = pseudo_attribute(body, "version")
            .ok_or_else(|| XmlError::InvalidDeclaration("missing version".to_owned()))?;
        let standalone = match pseudo_attribute(body, "standalone") {
            None => None,
            Some("yes") => Some(true),
            Some("no") => Some(false),
            Some(other) => {
                return Err(XmlError::InvalidDeclaration(format!(
                    "invalid standalone value '{other}'"
                )));
            }
        };

        // The text is already decoded and is written back out as UTF-8.
        let encoding = pseudo_attribute(body, "encoding").map(|_| "UTF-8".to_owned());

        Ok(Some(Declaration {
            version: version.to_owned(),
            encoding,
            standalone,
        }))
    }
}

fn pseudo_attribute<'a>(body: &'a str, name: &str) -> Option<&'a str> {
    let start = body.find(name)? + name.len();
    let rest = body[start..].trim_start().strip_prefix('=')?.trim_start();
    let quote = rest.chars().next().filter(|c| *c == '"' || *c == '\'')?;
    let rest = &rest[1..];
    let end = rest.find(quote)?;
    Some(&rest[..end])
}

impl std::fmt::Display for Declaration {
    /// Formats the declaration as an XML declaration string.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, r#"<?xml version="{}""#, self.version)?;

        if let Some(encoding) = &self.encoding {
            write!(f, r#" encoding="{encoding}""#)?;
        }

        if let Some(standalone) = self.standalone {
            let standalone_as_string = if standalone { "yes" } else { "no" };

            write!(f, r#" standalone="{standalone_as_string}""#)?;
        }

        write!(f, "?>")
    }
}
