//! # Typed endpoint wrappers
//!
//! One function per backend endpoint the client consumes, all paths
//! relative to the configured base address. Reads return the deserialized
//! entity; mutations return `()` — callers that care about the new server
//! state invalidate and refetch the relevant query instead of trusting a
//! creation response.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Filters, Page, Property, Review, SavedProperty, User};

/// Fields the registration endpoint accepts. Forwarded raw; the backend
/// owns validation and its field errors come back flattened as
/// [`ApiError::Validation`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub user_type: String,
    pub date_of_birth: String,
    pub gender: String,
    pub occupation: String,
}

/// Text fields for the property-creation endpoint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProperty {
    pub title: String,
    pub description: String,
    pub price: String,
    pub city: String,
}

/// An image attached to a property-creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Serialize)]
struct InquiryRequest<'a> {
    property: i64,
    message: &'a str,
}

impl ApiClient {
    /// POST `auth/login/`. Returns the session token; the caller decides
    /// where to store it.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let response: LoginResponse = self
            .post_json("auth/login/", &LoginRequest { username, password })
            .await?;
        Ok(response.token)
    }

    /// POST `auth/register/`.
    pub async fn register(&self, form: &RegistrationForm) -> Result<(), ApiError> {
        self.post_json_empty("auth/register/", form).await
    }

    /// GET `auth/profile/` — "who am I". 401 when no valid token is held.
    pub async fn profile(&self) -> Result<User, ApiError> {
        self.get_json("auth/profile/", &[]).await
    }

    /// GET `properties/` with the given filters as query parameters.
    pub async fn list_properties(&self, filters: &Filters) -> Result<Page<Property>, ApiError> {
        self.get_json("properties/", &filters.to_query_pairs()).await
    }

    /// GET `properties/{id}/`.
    pub async fn property(&self, id: i64) -> Result<Property, ApiError> {
        self.get_json(&format!("properties/{id}/"), &[]).await
    }

    /// POST `properties/create/` as multipart form data: the text fields
    /// plus each image as a named file part.
    pub async fn create_property(
        &self,
        property: &NewProperty,
        images: Vec<ImageFile>,
    ) -> Result<(), ApiError> {
        let mut form = Form::new()
            .text("title", property.title.clone())
            .text("description", property.description.clone())
            .text("price", property.price.clone())
            .text("city", property.city.clone());
        for image in images {
            form = form.part("images", Part::bytes(image.bytes).file_name(image.name));
        }
        self.execute_empty(
            self.bare_request(Method::POST, "properties/create/")
                .multipart(form),
        )
        .await
    }

    /// GET `properties/{id}/reviews/`.
    pub async fn reviews(&self, property_id: i64) -> Result<Vec<Review>, ApiError> {
        self.get_json(&format!("properties/{property_id}/reviews/"), &[])
            .await
    }

    /// POST `inquiries/`.
    pub async fn submit_inquiry(&self, property_id: i64, message: &str) -> Result<(), ApiError> {
        self.post_json_empty(
            "inquiries/",
            &InquiryRequest {
                property: property_id,
                message,
            },
        )
        .await
    }

    /// GET `saved-properties/`.
    pub async fn saved_properties(&self) -> Result<Vec<SavedProperty>, ApiError> {
        self.get_json("saved-properties/", &[]).await
    }

    /// DELETE `saved-properties/{id}/remove/`.
    pub async fn remove_saved(&self, property_id: i64) -> Result<(), ApiError> {
        self.delete(&format!("saved-properties/{property_id}/remove/"))
            .await
    }
}
