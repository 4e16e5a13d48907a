use serde::Deserialize;

/// Create/update submission. Every field is optional so that missing input reaches validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PostForm {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
    #[serde(rename = "_method")]
    pub(crate) method: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MethodOverride {
    Update,
    Delete,
}

impl PostForm {
    pub(crate) fn method_override(&self) -> Option<MethodOverride> {
        let method = self.method.as_deref()?.trim();
        if method.eq_ignore_ascii_case("PUT") || method.eq_ignore_ascii_case("PATCH") {
            Some(MethodOverride::Update)
        } else if method.eq_ignore_ascii_case("DELETE") {
            Some(MethodOverride::Delete)
        } else {
            None
        }
    }
}

/// Query parameters that open a dialog on the rendered screen.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ScreenQuery {
    pub(crate) dialog: Option<String>,
    pub(crate) edit: Option<i64>,
    pub(crate) delete: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScreenDialog {
    Closed,
    Create,
    Edit(i64),
    Delete(i64),
}

impl ScreenQuery {
    /// At most one dialog opens; `edit` wins over `delete`, which wins over `dialog=create`.
    pub(crate) fn dialog(&self) -> ScreenDialog {
        if let Some(id) = self.edit {
            ScreenDialog::Edit(id)
        } else if let Some(id) = self.delete {
            ScreenDialog::Delete(id)
        } else if self.dialog.as_deref() == Some("create") {
            ScreenDialog::Create
        } else {
            ScreenDialog::Closed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(method: Option<&str>) -> PostForm {
        PostForm {
            method: method.map(str::to_string),
            ..PostForm::default()
        }
    }

    #[test]
    fn method_override_is_case_insensitive() {
        assert_eq!(form(Some("put")).method_override(), Some(MethodOverride::Update));
        assert_eq!(form(Some("PATCH")).method_override(), Some(MethodOverride::Update));
        assert_eq!(form(Some(" Delete ")).method_override(), Some(MethodOverride::Delete));
        assert_eq!(form(Some("GET")).method_override(), None);
        assert_eq!(form(None).method_override(), None);
    }

    #[test]
    fn edit_takes_precedence() {
        let query = ScreenQuery {
            dialog: Some("create".into()),
            edit: Some(3),
            delete: Some(4),
        };
        assert_eq!(query.dialog(), ScreenDialog::Edit(3));
        assert_eq!(ScreenQuery::default().dialog(), ScreenDialog::Closed);
    }
}
