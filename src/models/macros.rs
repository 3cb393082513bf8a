/// Declares an actor message whose handler returns `Result<$res, APIError>`.
macro_rules! actor_message {
    ($name:ident -> $res:ty) => {
        #[derive(Debug)]
        pub struct $name;

        impl ::actix::Message for $name {
            type Result = Result<$res, $crate::api::APIError>;
        }
    };

    ($name:ident($($field:ident: $ty:ty),* $(,)?) -> $res:ty) => {
        #[derive(Debug)]
        pub struct $name {
            $(pub $field: $ty),*
        }

        impl ::actix::Message for $name {
            type Result = Result<$res, $crate::api::APIError>;
        }
    };
}

/// Renders a versioned API model as a JSON response body.
macro_rules! json_responder {
    ($name:ty) => {
        json_responder!($name => ::actix_web::http::StatusCode::OK);
    };

    ($name:ty => $status:expr) => {
        impl ::actix_web::Responder for $name {
            type Body = ::actix_web::body::BoxBody;

            fn respond_to(self, _req: &::actix_web::HttpRequest) -> ::actix_web::HttpResponse<Self::Body> {
                ::actix_web::HttpResponse::build($status)
                    .content_type("application/json; charset=utf-8")
                    .json(&self)
            }
        }
    };
}
