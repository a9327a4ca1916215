use actix_web::HttpResponse;

#[derive(serde::Serialize)]
pub struct SuccessData<T: serde::Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

pub struct Success<T: serde::Serialize> {
    pub status: actix_web::http::StatusCode,
    pub body: SuccessData<T>,
}

impl<T: serde::Serialize> Success<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: actix_web::http::StatusCode::OK,
            body: SuccessData { success: true, data },
        }
    }
}

impl<T: serde::Serialize> actix_web::Responder for Success<T> {
    type Body = actix_web::body::BoxBody;

    fn respond_to(self, _req: &actix_web::HttpRequest) -> HttpResponse<Self::Body> {
        HttpResponse::build(self.status).json(self.body)
    }
}
