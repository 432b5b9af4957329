//! HTTP contract of the product collection service.

use std::fmt;

use crate::domain::ProductId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for ServiceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        })
    }
}

/// One endpoint below the configured service base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceRoute {
    ListAll,
    Save,
    Update,
    Delete(ProductId),
}

impl ServiceRoute {
    pub fn method(&self) -> ServiceMethod {
        match self {
            Self::ListAll => ServiceMethod::Get,
            Self::Save => ServiceMethod::Post,
            Self::Update => ServiceMethod::Put,
            Self::Delete(_) => ServiceMethod::Delete,
        }
    }

    /// Stable name used in log fields and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ListAll => "list_all",
            Self::Save => "save",
            Self::Update => "update",
            Self::Delete(_) => "delete",
        }
    }

    /// Unencoded path segments; the transport percent-encodes them.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Self::ListAll => vec!["all"],
            Self::Save => vec!["save"],
            Self::Update => vec!["update"],
            Self::Delete(product_id) => vec!["delete", product_id.as_str()],
        }
    }

    pub fn path(&self) -> String {
        self.segments()
            .iter()
            .fold(String::new(), |mut path, segment| {
                path.push('/');
                path.push_str(segment);
                path
            })
    }
}

impl fmt::Display for ServiceRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_match_service_contract() {
        assert_eq!(ServiceRoute::ListAll.to_string(), "GET /all");
        assert_eq!(ServiceRoute::Save.to_string(), "POST /save");
        assert_eq!(ServiceRoute::Update.to_string(), "PUT /update");
        assert_eq!(
            ServiceRoute::Delete(ProductId::new("42")).to_string(),
            "DELETE /delete/42"
        );
    }
}
