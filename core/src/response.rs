//! Decoded response snapshots.
//!
//! Every struct here is `#[serde(default)]` and every field goes through
//! `null_as_default`: keys the server leaves out or sends as `null` decode to
//! zero values, keys it adds later are ignored.

use serde::{Deserialize, Serialize};

use crate::codec::null_as_default;

/// Status envelope present in every server reply.
///
/// `code` mirrors the HTTP status; `dd_code` / `dd_msg` carry the server's
/// finer-grained error code and are zero / empty when absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    #[serde(deserialize_with = "null_as_default")]
    pub code: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub msg: String,
    #[serde(deserialize_with = "null_as_default")]
    pub dd_code: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub dd_msg: String,
}

impl Status {
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// Reply to `GET /info`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(deserialize_with = "null_as_default")]
    pub head: InfoHead,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoHead {
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(deserialize_with = "null_as_default")]
    pub branch: String,
    #[serde(deserialize_with = "null_as_default")]
    pub commit: String,
    #[serde(deserialize_with = "null_as_default")]
    pub services: Vec<ServiceSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSummary {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mltype: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mllib: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub predict: bool,
}

/// Reply to service creation and deletion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    #[serde(deserialize_with = "null_as_default")]
    pub status: Status,
}

/// Reply to `GET /services/{name}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    #[serde(deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(deserialize_with = "null_as_default")]
    pub body: ServiceInfoBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfoBody {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mllib: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mltype: String,
    #[serde(deserialize_with = "null_as_default")]
    pub jobs: Vec<Job>,
}

/// A training job attached to a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Job {
    #[serde(deserialize_with = "null_as_default")]
    pub job: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
}

/// Reply to `POST /predict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictResult {
    #[serde(deserialize_with = "null_as_default")]
    pub status: Status,
    #[serde(deserialize_with = "null_as_default")]
    pub head: PredictHead,
    #[serde(deserialize_with = "null_as_default")]
    pub body: PredictBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictHead {
    #[serde(deserialize_with = "null_as_default")]
    pub method: String,
    #[serde(deserialize_with = "null_as_default")]
    pub service: String,
    #[serde(deserialize_with = "null_as_default")]
    pub time: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictBody {
    #[serde(deserialize_with = "null_as_default")]
    pub predictions: Vec<Prediction>,
}

/// Predictions for one input, in the order the server ranked them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prediction {
    #[serde(deserialize_with = "null_as_default")]
    pub uri: String,
    #[serde(deserialize_with = "null_as_default")]
    pub classes: Vec<PredictedClass>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictedClass {
    #[serde(deserialize_with = "null_as_default")]
    pub cat: String,
    #[serde(deserialize_with = "null_as_default")]
    pub prob: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub last: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub bbox: BoundingBox,
    #[serde(deserialize_with = "null_as_default")]
    pub mask: Mask,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundingBox {
    #[serde(deserialize_with = "null_as_default")]
    pub xmin: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub ymin: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub xmax: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub ymax: f64,
}

/// Segmentation mask, row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Mask {
    #[serde(deserialize_with = "null_as_default")]
    pub format: String,
    #[serde(deserialize_with = "null_as_default")]
    pub width: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub height: i32,
    #[serde(deserialize_with = "null_as_default")]
    pub data: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn status_is_ok_for_2xx() {
        let created = Status {
            code: 201,
            msg: "Created".to_string(),
            ..Status::default()
        };
        assert!(created.is_ok());
        let missing = Status {
            code: 404,
            ..Status::default()
        };
        assert!(!missing.is_ok());
    }

    #[test]
    fn info_decodes_service_summaries_in_order() {
        let body = br#"{
            "status":{"code":200,"msg":"OK"},
            "head":{"method":"/info","version":"v0.9.7","branch":"master","commit":"abc123",
                "services":[
                    {"name":"b","mltype":"classification","mllib":"caffe","description":"","predict":true},
                    {"name":"a","mllib":"xgboost"}
                ]}
        }"#;
        let info: InstanceInfo = decode(body).unwrap();
        assert_eq!(info.head.version, "v0.9.7");
        let names: Vec<_> = info.head.services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert!(!info.head.services[1].predict);
    }

    #[test]
    fn predict_result_decodes_bbox_and_mask() {
        let body = br#"{
            "status":{"code":200,"msg":"OK"},
            "head":{"method":"/predict","service":"imageserv","time":412.0},
            "body":{"predictions":[{"uri":"dog.jpg","classes":[
                {"prob":0.92,"cat":"dog","last":true,
                 "bbox":{"xmin":10.5,"ymin":20.0,"xmax":110.0,"ymax":220.25},
                 "mask":{"format":"HW","width":2,"height":1,"data":[0,1]}}
            ]}]}
        }"#;
        let result: PredictResult = decode(body).unwrap();
        let class = &result.body.predictions[0].classes[0];
        assert_eq!(class.cat, "dog");
        assert_eq!(class.bbox.ymax, 220.25);
        assert_eq!(class.mask.data, vec![0, 1]);
        assert_eq!(result.head.time, 412.0);
    }

    #[test]
    fn null_records_and_arrays_decode_to_zero_values() {
        let info: ServiceInfo = decode(br#"{"status":{"code":200,"msg":"OK"},"body":null}"#).unwrap();
        assert_eq!(info.status.code, 200);
        assert_eq!(info.body, ServiceInfoBody::default());

        let info: ServiceInfo =
            decode(br#"{"status":{"code":200,"msg":null},"body":{"name":"s","jobs":null}}"#).unwrap();
        assert_eq!(info.status.msg, "");
        assert_eq!(info.body.name, "s");
        assert!(info.body.jobs.is_empty());

        let info: InstanceInfo = decode(br#"{"status":null,"head":{"services":null}}"#).unwrap();
        assert_eq!(info, InstanceInfo::default());

        let result: PredictResult = decode(
            br#"{"body":{"predictions":[{"uri":"a.jpg","classes":[{"cat":"dog","bbox":null,"mask":{"data":null}}]}]}}"#,
        )
        .unwrap();
        let class = &result.body.predictions[0].classes[0];
        assert_eq!(class.bbox, BoundingBox::default());
        assert!(class.mask.data.is_empty());
    }

    #[test]
    fn null_does_not_hide_type_mismatches() {
        assert!(decode::<ServiceInfo>(br#"{"body":{"jobs":"none"}}"#).is_err());
    }

    #[test]
    fn dd_codes_decode_when_present() {
        let info: ServiceInfo = decode(
            br#"{"status":{"code":404,"msg":"NotFound","dd_code":1002,"dd_msg":"Service Not Found"}}"#,
        )
        .unwrap();
        assert_eq!(info.status.dd_code, 1002);
        assert_eq!(info.status.dd_msg, "Service Not Found");
        assert_eq!(info.body, ServiceInfoBody::default());
    }
}
