use crate::{
    Credentials, DeleteOutcome, MessageResponse, Product, ProductUpdate, Profile, Registration,
    Session,
};
use serde::{Serialize, de::DeserializeOwned};
use url::form_urlencoded;

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// REST resources exposed by the catalog API, each mounted under its own root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Products,
    Profiles,
    Auth,
}

impl Resource {
    pub fn root(&self) -> &'static str {
        match self {
            Resource::Products => "/api/products",
            Resource::Profiles => "/api/profiles",
            Resource::Auth => "/api/auth",
        }
    }

    /// Whether calls against this resource carry the session's bearer token.
    pub fn sends_bearer(&self) -> bool {
        matches!(self, Resource::Products)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
pub trait ApiRequest {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The JSON body type, `()` for body-less requests.
    type Body: Serialize;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The resource the path is relative to.
    const RESOURCE: Resource;

    /// The URL path below the resource root, including any query string.
    fn path(&self) -> String;

    fn body(&self) -> Option<&Self::Body> {
        None
    }
}

// =========================================================
// Products
// =========================================================

/// List every product
#[derive(Debug, Clone, Copy, Default)]
pub struct ListProducts;

impl ApiRequest for ListProducts {
    type Response = Vec<Product>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const RESOURCE: Resource = Resource::Products;

    fn path(&self) -> String {
        "/".to_string()
    }
}

/// Server-side substring search by name
#[derive(Debug, Clone)]
pub struct SearchProducts {
    pub name: String,
}

impl ApiRequest for SearchProducts {
    type Response = Vec<Product>;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const RESOURCE: Resource = Resource::Products;

    fn path(&self) -> String {
        let encoded: String = form_urlencoded::byte_serialize(self.name.as_bytes()).collect();
        format!("/search?name={}", encoded)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub id: String,
    pub fields: ProductUpdate,
}

impl ApiRequest for UpdateProduct {
    type Response = Product;
    type Body = ProductUpdate;
    const METHOD: HttpMethod = HttpMethod::Put;
    const RESOURCE: Resource = Resource::Products;

    fn path(&self) -> String {
        format!("/{}", encode_segment(&self.id))
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.fields)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteProduct {
    pub id: String,
}

impl ApiRequest for DeleteProduct {
    type Response = DeleteOutcome;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Delete;
    const RESOURCE: Resource = Resource::Products;

    fn path(&self) -> String {
        format!("/{}", encode_segment(&self.id))
    }
}

// =========================================================
// Profiles
// =========================================================

#[derive(Debug, Clone)]
pub struct GetProfile {
    pub id: String,
}

impl ApiRequest for GetProfile {
    type Response = Profile;
    type Body = ();
    const METHOD: HttpMethod = HttpMethod::Get;
    const RESOURCE: Resource = Resource::Profiles;

    fn path(&self) -> String {
        format!("/{}", encode_segment(&self.id))
    }
}

// =========================================================
// Auth
// =========================================================

/// Exchange credentials for a session
#[derive(Debug, Clone)]
pub struct Login(pub Credentials);

impl ApiRequest for Login {
    type Response = Session;
    type Body = Credentials;
    const METHOD: HttpMethod = HttpMethod::Post;
    const RESOURCE: Resource = Resource::Auth;

    fn path(&self) -> String {
        "/login".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Register(pub Registration);

impl ApiRequest for Register {
    type Response = MessageResponse;
    type Body = Registration;
    const METHOD: HttpMethod = HttpMethod::Post;
    const RESOURCE: Resource = Resource::Auth;

    fn path(&self) -> String {
        "/register".to_string()
    }

    fn body(&self) -> Option<&Self::Body> {
        Some(&self.0)
    }
}

/// Percent-encode a single path segment (identifiers are opaque server strings).
fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Price;

    #[test]
    fn search_query_is_form_encoded() {
        let req = SearchProducts {
            name: "blue wid&get".to_string(),
        };
        assert_eq!(req.path(), "/search?name=blue+wid%26get");
    }

    #[test]
    fn identifiers_are_path_encoded() {
        let req = DeleteProduct {
            id: "a b/c".to_string(),
        };
        assert_eq!(req.path(), "/a%20b%2Fc");

        let plain = GetProfile {
            id: "665f1c2e9b1d".to_string(),
        };
        assert_eq!(plain.path(), "/665f1c2e9b1d");
    }

    #[test]
    fn only_products_send_bearer() {
        assert!(Resource::Products.sends_bearer());
        assert!(!Resource::Profiles.sends_bearer());
        assert!(!Resource::Auth.sends_bearer());
    }

    #[test]
    fn update_request_exposes_fields_as_body() {
        let fields = ProductUpdate {
            name: "n".into(),
            price: Price::new(1.0).unwrap(),
            category: "c".into(),
            in_stock: true,
        };
        let req = UpdateProduct {
            id: "p1".into(),
            fields: fields.clone(),
        };
        assert_eq!(UpdateProduct::METHOD, HttpMethod::Put);
        assert_eq!(req.path(), "/p1");
        assert_eq!(req.body(), Some(&fields));
        assert!(ListProducts.body().is_none());
    }
}
