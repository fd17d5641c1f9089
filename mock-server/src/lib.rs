use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{DefaultBodyLimit, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

pub const VERSION: &str = "v0.9.7-mock";

/// A registered service as the mock remembers it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub mllib: String,
    pub description: String,
    pub mltype: String,
}

#[derive(Deserialize)]
pub struct CreateService {
    pub mllib: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "type")]
    pub service_type: Option<String>,
    #[serde(default)]
    pub parameters: Value,
}

#[derive(Deserialize)]
pub struct Predict {
    pub service: String,
    #[serde(default)]
    pub parameters: Value,
    #[serde(default)]
    pub data: Vec<String>,
}

pub type Db = Arc<RwLock<BTreeMap<String, Service>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(BTreeMap::new()));
    Router::new()
        .route("/info", get(info))
        .route(
            "/services/{name}",
            get(service_info).put(create_service).delete(delete_service),
        )
        .route("/predict", post(predict))
        .layer(DefaultBodyLimit::disable())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn status(code: StatusCode, dd: Option<(u16, &str)>) -> Value {
    let mut status = json!({
        "code": code.as_u16(),
        "msg": code.canonical_reason().unwrap_or("").replace(' ', ""),
    });
    if let Some((dd_code, dd_msg)) = dd {
        status["dd_code"] = json!(dd_code);
        status["dd_msg"] = json!(dd_msg);
    }
    status
}

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "status": status(StatusCode::NOT_FOUND, Some((1002, "Service Not Found"))) })),
    )
}

async fn info(State(db): State<Db>) -> Json<Value> {
    let services = db.read().await;
    let services: Vec<Value> = services
        .values()
        .map(|s| {
            json!({
                "name": s.name,
                "mltype": s.mltype,
                "mllib": s.mllib,
                "description": s.description,
                "predict": false,
            })
        })
        .collect();
    Json(json!({
        "status": status(StatusCode::OK, None),
        "head": {
            "method": "/info",
            "version": VERSION,
            "branch": "master",
            "commit": "0000000",
            "services": services,
        },
    }))
}

async fn create_service(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(input): Json<CreateService>,
) -> (StatusCode, Json<Value>) {
    if input.parameters["input"]["connector"].as_str().unwrap_or("").is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "status": status(StatusCode::BAD_REQUEST, Some((1006, "Service Input Error"))) })),
        );
    }
    let mut services = db.write().await;
    if services.contains_key(&name) {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "status": status(StatusCode::CONFLICT, Some((1014, "Service Already Exists"))) })),
        );
    }
    services.insert(
        name.clone(),
        Service {
            name,
            mllib: input.mllib,
            description: input.description,
            mltype: input.service_type.unwrap_or_else(|| "supervised".to_string()),
        },
    );
    (
        StatusCode::CREATED,
        Json(json!({ "status": status(StatusCode::CREATED, None) })),
    )
}

async fn service_info(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> (StatusCode, Json<Value>) {
    let services = db.read().await;
    match services.get(&name) {
        Some(s) => (
            StatusCode::OK,
            Json(json!({
                "status": status(StatusCode::OK, None),
                "head": { "method": "/services" },
                "body": {
                    "name": s.name,
                    "mllib": s.mllib,
                    "description": s.description,
                    "mltype": s.mltype,
                    "jobs": [],
                },
            })),
        ),
        None => not_found(),
    }
}

async fn delete_service(
    State(db): State<Db>,
    Path(name): Path<String>,
) -> (StatusCode, Json<Value>) {
    let mut services = db.write().await;
    match services.remove(&name) {
        Some(_) => (
            StatusCode::OK,
            Json(json!({ "status": status(StatusCode::OK, None) })),
        ),
        None => not_found(),
    }
}

/// Answers every input with up to three fixed classes. Honors `output.bbox`,
/// `output.mask` and `output.best` so clients can see the parameters arrive.
async fn predict(State(db): State<Db>, Json(input): Json<Predict>) -> (StatusCode, Json<Value>) {
    if !db.read().await.contains_key(&input.service) {
        return not_found();
    }
    let output = &input.parameters["output"];
    let bbox = output["bbox"].as_bool().unwrap_or(false);
    let mask = output["mask"].as_bool().unwrap_or(false);
    let best = output["best"].as_u64().unwrap_or(1).max(1) as usize;

    let predictions: Vec<Value> = input
        .data
        .iter()
        .map(|uri| {
            let mut classes: Vec<Value> = ["dog", "cat", "horse"]
                .iter()
                .take(best)
                .enumerate()
                .map(|(rank, cat)| {
                    let mut class = json!({ "cat": cat, "prob": 0.9 / (rank as f64 + 1.0) });
                    if bbox {
                        class["bbox"] = json!({ "xmin": 10.0, "ymin": 20.0, "xmax": 110.0, "ymax": 220.0 });
                    }
                    if mask {
                        class["mask"] = json!({ "format": "HW", "width": 2, "height": 2, "data": [0, 1, 1, 0] });
                    }
                    class
                })
                .collect();
            if let Some(last) = classes.last_mut() {
                last["last"] = json!(true);
            }
            json!({ "uri": uri, "classes": classes })
        })
        .collect();

    (
        StatusCode::OK,
        Json(json!({
            "status": status(StatusCode::OK, None),
            "head": { "method": "/predict", "service": input.service, "time": 12.0 },
            "body": { "predictions": predictions },
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strips_spaces_from_reason() {
        let s = status(StatusCode::NOT_FOUND, None);
        assert_eq!(s, json!({"code": 404, "msg": "NotFound"}));
    }

    #[test]
    fn status_carries_dd_codes() {
        let s = status(StatusCode::NOT_FOUND, Some((1002, "Service Not Found")));
        assert_eq!(s["dd_code"], 1002);
        assert_eq!(s["dd_msg"], "Service Not Found");
    }

    #[test]
    fn create_service_defaults_optional_fields() {
        let input: CreateService = serde_json::from_str(r#"{"mllib":"caffe"}"#).unwrap();
        assert_eq!(input.mllib, "caffe");
        assert_eq!(input.description, "");
        assert!(input.service_type.is_none());
        assert!(input.parameters.is_null());
    }

    #[test]
    fn create_service_rejects_missing_mllib() {
        let result: Result<CreateService, _> = serde_json::from_str(r#"{"description":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn predict_defaults_data() {
        let input: Predict = serde_json::from_str(r#"{"service":"imageserv"}"#).unwrap();
        assert!(input.data.is_empty());
    }
}
