//! 应用入口 - 编排层
//!
//! ## 核心功能
//!
//! 1. **定位项目**：向上查找 `list-submit.toml`，或按项目名向下查找
//! 2. **管理文件列表**：`add` / `remove` / `clean`
//! 3. **登录信息**：环境变量优先，其次是全局配置，都没有时提示输入
//! 4. **提交**：运行 [`SubmitFlow`] 并输出结果摘要
//!
//! 本地配置只在对应步骤成功之后才写入。

use std::path::{Path, PathBuf};

use colored::Colorize;
use tracing::{debug, info};

use crate::clients::{ListClient, PortalApi};
use crate::config::Config;
use crate::error::{ListError, Result};
use crate::infrastructure::Interrupt;
use crate::models::{
    find_project_config_down, find_project_config_up, global_config_path, load_global_config,
    load_project_config, save_global_config, save_project_config, AuthConfig, GlobalConfig,
    ProjectConfig,
};
use crate::orchestrator::cli::{Cli, Command};
use crate::orchestrator::paths::relative_to_project;
use crate::orchestrator::setup::InteractiveSetup;
use crate::utils::prompt::{confirm, prompt, prompt_password};
use crate::utils::{show_request, SpinnerSteps};
use crate::workflow::{
    render_summary, ContextResolver, Credentials, FlowOutcome, PollSettings, StoredContext,
    SubmitContext, SubmitFlow,
};

/// 一次添加超过这么多文件时要求确认
const ADD_CONFIRM_THRESHOLD: usize = 3;

/// 找到的项目配置
struct ProjectLocation {
    path: PathBuf,
    dir: PathBuf,
    config: ProjectConfig,
}

/// 从哪里得到的登录信息
struct LoginSource {
    credentials: Credentials,
    /// 新输入的登录信息，登录成功后写入全局配置
    unsaved: bool,
}

/// 应用主结构
pub struct App {
    config: Config,
    client: ListClient,
    interrupt: Interrupt,
    global_config_path: PathBuf,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        let global_config_path = global_config_path()?;
        let client = ListClient::new(&config);
        let interrupt = Interrupt::listen_ctrl_c();

        debug!("门户地址: {}", config.base_url);
        debug!("全局配置: {}", global_config_path.display());

        Ok(Self {
            config,
            client,
            interrupt,
            global_config_path,
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self, cli: &Cli) -> Result<()> {
        if cli.auth {
            return self.store_credentials().await;
        }

        let cwd = std::env::current_dir().map_err(|e| ListError::io(".", e))?;
        let location = self.locate_project(&cwd, cli.project.as_deref()).await?;

        match &cli.command {
            Some(Command::Add { files }) => self.add_files(location, &cwd, files, cli.yes).await,
            Some(Command::Remove { files }) => {
                let location = location.ok_or_else(missing_project)?;
                self.remove_files(location, &cwd, files).await
            }
            Some(Command::Clean) => {
                let location = location.ok_or_else(missing_project)?;
                self.clean_files(location).await
            }
            None => self.submit(location, &cwd, cli.yes).await,
        }
    }

    // ========== 登录信息 ==========

    /// `--auth`：输入并保存登录信息
    async fn store_credentials(&self) -> Result<()> {
        let email = prompt("Enter your email")?;
        let password = prompt_password("Enter your password")?;

        let mut global = self.load_global().await?;
        global.auth = Some(AuthConfig { email, password });
        save_global_config(&self.global_config_path, &global).await?;

        println!(
            "{} {}",
            "Saved".purple(),
            self.global_config_path.display()
        );
        Ok(())
    }

    async fn load_global(&self) -> Result<GlobalConfig> {
        Ok(load_global_config(&self.global_config_path)
            .await?
            .unwrap_or_default())
    }

    async fn login_source(&self) -> Result<LoginSource> {
        if let (Some(email), Some(password)) = (&self.config.email, &self.config.password) {
            debug!("使用环境变量中的登录信息");
            return Ok(LoginSource {
                credentials: Credentials {
                    email: email.clone(),
                    password: password.clone(),
                },
                unsaved: false,
            });
        }

        if let Some(auth) = self.load_global().await?.auth {
            return Ok(LoginSource {
                credentials: Credentials {
                    email: auth.email,
                    password: auth.password,
                },
                unsaved: false,
            });
        }

        println!("{}", "No saved login, please sign in:".bold());
        Ok(LoginSource {
            credentials: Credentials {
                email: prompt("Enter your email")?,
                password: prompt_password("Enter your password")?,
            },
            unsaved: true,
        })
    }

    // ========== 项目配置 ==========

    async fn locate_project(
        &self,
        cwd: &Path,
        project: Option<&str>,
    ) -> Result<Option<ProjectLocation>> {
        let path = match project {
            Some(name) => find_project_config_down(cwd, name).await?,
            None => find_project_config_up(cwd),
        };

        let Some(path) = path else {
            debug!("没有找到项目配置");
            return Ok(None);
        };

        let dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        let config = load_project_config(&path).await?;
        debug!("项目配置: {}", path.display());

        Ok(Some(ProjectLocation { path, dir, config }))
    }

    /// 没有项目配置时：登录并交互式创建
    async fn create_project(&self, cwd: &Path, yes: bool) -> Result<ProjectLocation> {
        let login = self.login_source().await?;
        let session = show_request(
            "logging in",
            self.client
                .login(&login.credentials.email, &login.credentials.password),
        )
        .await?;
        self.remember_login(&login, yes).await?;

        let mut setup = InteractiveSetup::new(cwd);
        <InteractiveSetup as ContextResolver<ListClient>>::resolve(&mut setup, &self.client, &session)
            .await?;

        let path = setup.config_path();
        let config = setup
            .into_created()
            .ok_or_else(|| ListError::Config("项目配置未创建".to_string()))?;

        Ok(ProjectLocation {
            path,
            dir: cwd.to_path_buf(),
            config,
        })
    }

    async fn remember_login(&self, login: &LoginSource, yes: bool) -> Result<()> {
        let save = should_save_login(login, yes, || {
            confirm("Do you want to save your password?", true)
        })?;
        if !save {
            return Ok(());
        }
        let mut global = self.load_global().await?;
        global.auth = Some(AuthConfig {
            email: login.credentials.email.clone(),
            password: login.credentials.password.clone(),
        });
        save_global_config(&self.global_config_path, &global).await?;
        info!("✓ 登录信息已保存: {}", self.global_config_path.display());
        Ok(())
    }

    // ========== 文件列表 ==========

    async fn add_files(
        &self,
        location: Option<ProjectLocation>,
        cwd: &Path,
        files: &[PathBuf],
        yes: bool,
    ) -> Result<()> {
        let mut location = match location {
            Some(location) => location,
            None => self.create_project(cwd, yes).await?,
        };

        let mut relative = Vec::with_capacity(files.len());
        for file in files {
            let absolute = cwd.join(file);
            if !absolute.is_file() {
                return Err(ListError::Config(format!("文件不存在: {}", file.display())));
            }
            relative.push(relative_to_project(cwd, &location.dir, file)?);
        }

        for file in &relative {
            println!("{} {}", "Adding".purple(), file);
        }
        if relative.len() > ADD_CONFIRM_THRESHOLD
            && !yes
            && !confirm(
                &format!(
                    "You are about to add these {} files to the project. Continue?",
                    relative.len()
                ),
                true,
            )?
        {
            return Ok(());
        }

        let added = location.config.add_files(relative);
        save_project_config(&location.path, &location.config).await?;
        info!("✓ 新增 {} 个文件", added);
        Ok(())
    }

    async fn remove_files(
        &self,
        mut location: ProjectLocation,
        cwd: &Path,
        files: &[PathBuf],
    ) -> Result<()> {
        let relative = files
            .iter()
            .map(|file| relative_to_project(cwd, &location.dir, file))
            .collect::<Result<Vec<_>>>()?;

        for file in &relative {
            println!("{} {}", "Removing".purple(), file);
        }

        let removed = location.config.remove_files(&relative);
        save_project_config(&location.path, &location.config).await?;
        info!("✓ 移除 {} 个文件", removed);
        Ok(())
    }

    async fn clean_files(&self, mut location: ProjectLocation) -> Result<()> {
        let missing = location
            .config
            .problem
            .files
            .iter()
            .filter(|file| !location.dir.join(file).is_file())
            .cloned()
            .collect::<Vec<_>>();

        if missing.is_empty() {
            println!("Nothing to clean");
            return Ok(());
        }

        for file in &missing {
            println!("{} {}", "Removing".purple(), file);
        }
        location.config.remove_files(&missing);
        save_project_config(&location.path, &location.config).await?;
        Ok(())
    }

    // ========== 提交 ==========

    async fn submit(&self, location: Option<ProjectLocation>, cwd: &Path, yes: bool) -> Result<()> {
        let login = self.login_source().await?;
        let steps = SpinnerSteps;
        let flow = SubmitFlow::new(
            &self.client,
            &steps,
            PollSettings::from(&self.config),
            self.interrupt.clone(),
        );

        let outcome = match location {
            Some(location) => {
                let context = SubmitContext::from_project(&location.config, &location.dir);
                println!(
                    "{} solution for {}",
                    "Submitting".purple(),
                    context.problem_name.bold()
                );
                let mut resolver = RememberLogin {
                    app: self,
                    login: &login,
                    yes,
                    inner: StoredContext(context),
                };
                flow.run(&login.credentials, &mut resolver).await?
            }
            None => {
                let mut resolver = RememberLogin {
                    app: self,
                    login: &login,
                    yes,
                    inner: InteractiveSetup::new(cwd),
                };
                flow.run(&login.credentials, &mut resolver).await?
            }
        };

        print_outcome(&outcome);
        Ok(())
    }
}

/// 登录成功后（进入选择目标阶段时）保存新输入的登录信息
struct RememberLogin<'a, R> {
    app: &'a App,
    login: &'a LoginSource,
    yes: bool,
    inner: R,
}

impl<'a, R: ContextResolver<ListClient>> ContextResolver<ListClient> for RememberLogin<'a, R> {
    async fn resolve(
        &mut self,
        api: &ListClient,
        session: &<ListClient as PortalApi>::Session,
    ) -> Result<SubmitContext> {
        self.app.remember_login(self.login, self.yes).await?;
        self.inner.resolve(api, session).await
    }
}

/// 只保存新输入的登录信息；`--yes` 时不询问直接保存
fn should_save_login(
    login: &LoginSource,
    yes: bool,
    ask: impl FnOnce() -> Result<bool>,
) -> Result<bool> {
    if !login.unsaved {
        return Ok(false);
    }
    if yes {
        return Ok(true);
    }
    ask()
}

fn missing_project() -> ListError {
    ListError::Config("找不到项目配置，请先在项目目录中运行 list-submit".to_string())
}

fn print_outcome(outcome: &FlowOutcome) {
    let Some(result) = &outcome.result else {
        println!("Problem has no tests to watch");
        return;
    };

    let mut lines = render_summary(result).into_iter();
    if let Some(total) = lines.next() {
        println!("{}", total.bold());
    }
    for line in lines {
        println!("{}", line);
    }
}
