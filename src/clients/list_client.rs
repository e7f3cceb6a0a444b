//! L.I.S.T. 门户客户端
//!
//! 每个协议步骤一个方法：检查状态码，把页面交给解析层，返回类型化的记录。
use std::sync::Arc;

use reqwest::cookie::Jar;
use reqwest::multipart::{Form, Part};
use reqwest::{redirect, Client, Response};
use serde::Deserialize;
use tracing::debug;

use super::portal::{PortalApi, TestRun};
use crate::config::Config;
use crate::error::{ListError, Result};
use crate::models::{Course, Problem, Submission, SubmitForm, TestQueueEntry, TestResult};
use crate::parser::{self, ParseError};

/// 门户下发的会话 cookie 名称
pub const SESSION_COOKIE: &str = "list_session";

const LOGIN_BUTTON: &str = "Prihlás ma";
const UPLOAD_BUTTON: &str = "Odovzdať riešenie";
const ARCHIVE_FILE_NAME: &str = "solution.zip";

/// 已登录的会话
///
/// 持有带 cookie 的 HTTP 客户端，进程结束时释放。
#[derive(Debug, Clone)]
pub struct Session {
    http: Client,
    base_url: String,
}

impl Session {
    /// 会话所属门户的地址
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// 门户客户端（未登录）
pub struct ListClient {
    base_url: String,
}

impl ListClient {
    /// 创建新的门户客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.base_url)
    }

    /// 使用自定义门户地址创建
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// JSON 状态接口的返回体 `{"status": true|false}`
#[derive(Debug, Deserialize)]
struct StatusFlag {
    status: bool,
}

/// 检查状态码是否为 2xx
fn ensure_success(response: &Response, endpoint: &str) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        return Err(ListError::remote(endpoint, format!("服务器返回状态码 {}", status)));
    }
    Ok(())
}

/// 解析 JSON 状态标志，格式不对或为 false 都视为失败
fn check_status_flag(body: &str, endpoint: &str) -> Result<()> {
    let flag: StatusFlag = serde_json::from_str(body).map_err(|e| {
        ListError::remote(endpoint, format!("无法解析状态响应 '{}': {}", body.trim(), e))
    })?;

    if !flag.status {
        return Err(ListError::remote(endpoint, "服务器返回 status=false"));
    }

    Ok(())
}

impl ListClient {
    async fn get_page(&self, session: &Session, path: &str) -> Result<String> {
        debug!("GET {}", path);
        let response = session.http.get(session.url(path)).send().await?;
        ensure_success(&response, path)?;
        Ok(response.text().await?)
    }
}

impl PortalApi for ListClient {
    type Session = Session;

    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let endpoint = "/students/do_login.html";
        let jar = Arc::new(Jar::default());

        // 登录接口成功时返回 302，需要关闭自动跳转才能看到
        let login_http = Client::builder()
            .cookie_provider(jar.clone())
            .redirect(redirect::Policy::none())
            .build()?;

        debug!("POST {} (用户: {})", endpoint, email);
        let response = login_http
            .post(format!("{}{}", self.base_url, endpoint))
            .form(&[
                ("student[email]", email),
                ("student[password]", password),
                ("button_submit", LOGIN_BUTTON),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_redirection() {
            return Err(ListError::authentication(format!(
                "服务器返回状态码 {}，请检查邮箱和密码",
                status
            )));
        }

        if !response.cookies().any(|c| c.name() == SESSION_COOKIE) {
            return Err(ListError::authentication("服务器没有下发会话 cookie"));
        }

        let http = Client::builder().cookie_provider(jar).build()?;

        Ok(Session {
            http,
            base_url: self.base_url.clone(),
        })
    }

    async fn list_courses(&self, session: &Session) -> Result<Vec<Course>> {
        let html = self.get_page(session, "/courses.html").await?;
        Ok(parser::parse_courses(&html)?)
    }

    async fn activate_course(&self, session: &Session, course_id: u32) -> Result<()> {
        let endpoint = format!("/courses/activate_course/{}.html", course_id);
        let body = self.get_page(session, &endpoint).await?;
        check_status_flag(&body, &endpoint)
    }

    async fn list_problems(&self, session: &Session, course_id: u32) -> Result<Vec<Problem>> {
        self.activate_course(session, course_id).await?;

        let html = self.get_page(session, "/tasks.html").await?;
        Ok(parser::parse_problems(&html)?)
    }

    async fn submit_solution(
        &self,
        session: &Session,
        problem_id: u32,
        archive: Vec<u8>,
    ) -> Result<Submission> {
        let endpoint = format!("/tasks/upload_solution/{}.html", problem_id);
        debug!("POST {} ({} 字节)", endpoint, archive.len());

        let part = Part::bytes(archive)
            .file_name(ARCHIVE_FILE_NAME)
            .mime_str("application/zip")?;
        let form = Form::new()
            .text("submit_button", UPLOAD_BUTTON)
            .part("file", part);

        let response = session
            .http
            .post(session.url(&endpoint))
            .multipart(form)
            .send()
            .await?;
        ensure_success(&response, &endpoint)?;

        let html = response.text().await?;
        let submissions = parser::parse_submissions(&html, problem_id)?;

        submissions
            .into_iter()
            .last()
            .ok_or_else(|| ParseError::new("上传后页面中的提交列表").into())
    }

    async fn get_submit_form(&self, session: &Session, problem_id: u32) -> Result<Option<SubmitForm>> {
        let html = self
            .get_page(session, &format!("/tasks/task/{}.html", problem_id))
            .await?;
        Ok(parser::parse_submit_form(&html)?)
    }

    async fn trigger_test_run(
        &self,
        session: &Session,
        problem_id: u32,
        submit_version: u32,
    ) -> Result<TestRun> {
        let form = match self.get_submit_form(session, problem_id).await? {
            Some(form) => form,
            None => {
                debug!("题目 {} 没有配置自动测试，不触发测试", problem_id);
                return Ok(TestRun::NoTests);
            }
        };

        let endpoint = "/index.php/fetests/enqueue_test";
        let mut data = vec![
            ("test[task_set_id]", form.task_set_id),
            ("test[student_id]", form.student_id.clone()),
            ("test[version]", submit_version.to_string()),
            ("select_test_type", form.select_test_type),
        ];
        data.extend(form.tests.into_iter().map(|test| ("test[id][]", test)));

        debug!("POST {} (版本 {})", endpoint, submit_version);
        let response = session
            .http
            .post(session.url(endpoint))
            .form(&data)
            .send()
            .await?;
        ensure_success(&response, endpoint)?;

        let body = response.text().await?;
        check_status_flag(&body, endpoint)?;

        Ok(TestRun::Enqueued {
            student_id: form.student_id,
        })
    }

    async fn poll_test_queue(
        &self,
        session: &Session,
        problem_id: u32,
        student_id: &str,
    ) -> Result<Vec<TestQueueEntry>> {
        let html = self
            .get_page(
                session,
                &format!(
                    "/index.php/fetests/get_student_test_queue/{}/{}",
                    problem_id, student_id
                ),
            )
            .await?;
        Ok(parser::parse_test_queue(&html)?)
    }

    async fn fetch_test_result(&self, session: &Session, test_id: u32) -> Result<TestResult> {
        let html = self
            .get_page(session, &format!("/tasks/test_result/{}.html", test_id))
            .await?;
        Ok(parser::parse_test_result(&html)?)
    }
}
