// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::Request,
    http::header::CONTENT_TYPE,
};
use std::collections::HashMap;

use crate::domain::models::report::Report;
use crate::domain::models::user::Identity;
use crate::domain::services::report_service::ReportTarget;
use crate::presentation::errors::ApiError;

/// 表单请求体的最大字节数，需容纳 base64 编码的图片
const MAX_FORM_BYTES: usize = 8 * 1024 * 1024;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const MULTIPART_CONTENT_TYPE: &str = "multipart/form-data";

/// 请求体中表单参数的编码方式
#[derive(Debug, Clone, PartialEq, Eq)]
enum FormEncoding {
    UrlEncoded,
    /// 携带 multipart 分隔符
    Multipart(String),
}

impl FormEncoding {
    fn detect(req: &Request) -> Result<Option<Self>, ApiError> {
        let Some(content_type) = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
        else {
            return Ok(None);
        };

        if content_type.starts_with(FORM_CONTENT_TYPE) {
            return Ok(Some(FormEncoding::UrlEncoded));
        }
        if content_type.starts_with(MULTIPART_CONTENT_TYPE) {
            let boundary = multer::parse_boundary(content_type)
                .map_err(|e| ApiError::Malformed(format!("multipart boundary: {}", e)))?;
            return Ok(Some(FormEncoding::Multipart(boundary)));
        }
        Ok(None)
    }
}

/// 请求参数
///
/// 查询串与表单（urlencoded 或 multipart）各解析一次；同名参数取第一个值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParams {
    query: HashMap<String, String>,
    form: HashMap<String, String>,
}

fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut values = HashMap::with_capacity(pairs.len());
    for (key, value) in pairs {
        values.entry(key).or_insert(value);
    }
    values
}

fn parse_query(query: Option<&str>) -> Result<Vec<(String, String)>, ApiError> {
    match query {
        Some(q) => serde_urlencoded::from_str(q)
            .map_err(|e| ApiError::Malformed(format!("query string: {}", e))),
        None => Ok(Vec::new()),
    }
}

/// 读取 multipart 请求体中的文本字段，文件字段被忽略
async fn parse_multipart(body: Bytes, boundary: String) -> Result<Vec<(String, String)>, ApiError> {
    let malformed = |e: multer::Error| ApiError::Malformed(format!("multipart body: {}", e));
    let mut multipart = multer::Multipart::new(Body::from(body).into_data_stream(), boundary);

    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.file_name().is_some() {
            continue;
        }
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.text().await.map_err(malformed)?;
        fields.push((name, value));
    }
    Ok(fields)
}

impl RequestParams {
    pub fn parse(query: Option<&str>, form: Option<&[u8]>) -> Result<Self, ApiError> {
        let form = match form {
            Some(body) => serde_urlencoded::from_bytes::<Vec<(String, String)>>(body)
                .map_err(|e| ApiError::Malformed(format!("form body: {}", e)))?,
            None => Vec::new(),
        };
        Ok(Self {
            query: first_values(parse_query(query)?),
            form: first_values(form),
        })
    }

    pub fn query(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    pub fn form(&self, key: &str) -> Option<&str> {
        self.form.get(key).map(String::as_str)
    }

    /// 缺失的查询参数视为空串
    pub fn query_or_empty(&self, key: &str) -> &str {
        self.query(key).unwrap_or("")
    }

    /// 缺失的表单参数视为空串
    pub fn form_or_empty(&self, key: &str) -> &str {
        self.form(key).unwrap_or("")
    }

    /// 从请求中解析参数
    ///
    /// 表单请求会读取整个请求体，解析后把同样的字节放回请求，
    /// 下游处理器仍可以自行读取请求体
    pub async fn extract(req: Request) -> Result<(Request, Self), ApiError> {
        let encoding = FormEncoding::detect(&req)?;
        let query = req.uri().query().map(str::to_owned);

        let Some(encoding) = encoding else {
            let params = Self::parse(query.as_deref(), None)?;
            return Ok((req, params));
        };

        let (parts, body) = req.into_parts();
        let bytes = to_bytes(body, MAX_FORM_BYTES)
            .await
            .map_err(|e| ApiError::Malformed(format!("reading form body: {}", e)))?;
        let params = match encoding {
            FormEncoding::UrlEncoded => Self::parse(query.as_deref(), Some(&bytes))?,
            FormEncoding::Multipart(boundary) => Self {
                query: first_values(parse_query(query.as_deref())?),
                form: first_values(parse_multipart(bytes.clone(), boundary).await?),
            },
        };
        Ok((Request::from_parts(parts, Body::from(bytes)), params))
    }
}

/// 分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
}

impl Pagination {
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// 单个请求在各阶段之间传递的上下文
///
/// 由认证阶段创建并放入请求扩展，之后的阶段只在其上补充字段
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub params: RequestParams,
    pub identity: Identity,
    pub pagination: Option<Pagination>,
    /// 举报参数校验得到的目标编号
    pub target_id: Option<i32>,
    /// 举报预处理加载的树洞或回复
    pub target: Option<ReportTarget>,
    pub draft_report: Option<Report>,
}

impl RequestContext {
    pub fn new(params: RequestParams, identity: Identity) -> Self {
        Self {
            params,
            identity,
            pagination: None,
            target_id: None,
            target: None,
            draft_report: None,
        }
    }

    pub fn of(req: &Request) -> Result<&RequestContext, ApiError> {
        req.extensions()
            .get::<RequestContext>()
            .ok_or_else(missing_context)
    }

    pub fn of_mut(req: &mut Request) -> Result<&mut RequestContext, ApiError> {
        req.extensions_mut()
            .get_mut::<RequestContext>()
            .ok_or_else(missing_context)
    }

    /// 分页阶段写入的分页参数
    pub fn pagination(&self) -> Result<Pagination, ApiError> {
        self.pagination.ok_or_else(|| {
            ApiError::Internal("pagination requested before the pagination stage ran".into())
        })
    }
}

fn missing_context() -> ApiError {
    ApiError::Internal("request context missing, the auth stage must run first".into())
}
