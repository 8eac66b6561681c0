//! Interactive menu
//!
//! The menu is a loop over [`MenuState`]: each step renders one screen, runs
//! whatever the user picked and returns the next state. Service calls are
//! driven to completion on the runtime one at a time.

use anyhow::Result;
use studyreport_core::CredentialStore;
use studyreport_domain::{ClassInfo, Credentials, RecordListing, Session, StudyError};
use tokio::runtime::Runtime;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::prompt::Prompt;
use crate::render;

const MAIN_CHOICES: [&str; 5] =
    ["获取组织人数信息", "获取组织详细信息", "查看/导出大学习信息", "完成大学习", "退出"];

const STUDY_CHOICES: [&str; 6] = [
    "导出全部完成情况名单",
    "导出全部未完成情况名单",
    "查看并导出特定子团支部完成情况名单",
    "查看并导出特定子团支部未完成情况名单",
    "查看并导出各个子团支部完成情况统计",
    "返回主菜单",
];

const BACK_TO_MAIN: &str = "返回主菜单";

/// Where the menu is
#[derive(Debug, Clone, PartialEq)]
pub enum MenuState {
    Login,
    Main,
    /// Choosing a study period.
    ClassPicker,
    /// Export actions for one period.
    Exports { class: ClassInfo },
    /// Choosing the sub-org whose listing is exported.
    SubOrgPicker { class: ClassInfo, listing: RecordListing },
    Done,
}

/// What the user picked on the export screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportAction {
    AllFinished,
    AllUnfinished,
    SubOrg(RecordListing),
    OrgSummary,
    Back,
}

impl ExportAction {
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => Self::AllFinished,
            1 => Self::AllUnfinished,
            2 => Self::SubOrg(RecordListing::Finished),
            3 => Self::SubOrg(RecordListing::Unfinished),
            4 => Self::OrgSummary,
            _ => Self::Back,
        }
    }
}

pub struct Menu {
    ctx: AppContext,
    prompt: Prompt,
    runtime: Runtime,
    session: Option<Session>,
}

impl Menu {
    pub fn new(ctx: AppContext, prompt: Prompt, runtime: Runtime) -> Self {
        Self { ctx, prompt, runtime, session: None }
    }

    /// Run until the user leaves.
    ///
    /// A rejected login is returned as an error carrying
    /// [`StudyError::LoginRejected`] so the caller can exit with its code;
    /// every other service failure is reported and the menu carries on.
    pub fn run(mut self) -> Result<()> {
        let mut state = MenuState::Login;
        while state != MenuState::Done {
            state = self.step(state)?;
        }
        info!("Menu closed");
        Ok(())
    }

    fn step(&mut self, state: MenuState) -> Result<MenuState> {
        let on_error = if state == MenuState::Login { MenuState::Login } else { MenuState::Main };

        let outcome = match state {
            MenuState::Login => self.login(),
            MenuState::Main => self.main_menu(),
            MenuState::ClassPicker => self.class_picker(),
            MenuState::Exports { class } => self.exports(class),
            MenuState::SubOrgPicker { class, listing } => self.sub_org_picker(class, listing),
            MenuState::Done => Ok(MenuState::Done),
        };

        match outcome {
            Ok(next) => Ok(next),
            Err(err) => match err.downcast::<StudyError>() {
                Ok(rejected @ StudyError::LoginRejected { .. }) => Err(rejected.into()),
                Ok(study) => {
                    warn!(error = %study, "Operation failed");
                    println!("操作失败：{study}");
                    Ok(on_error)
                }
                Err(other) => Err(other),
            },
        }
    }

    fn session(&self) -> Result<&Session> {
        self.session
            .as_ref()
            .ok_or_else(|| StudyError::Internal("no active session".into()).into())
    }

    fn login(&mut self) -> Result<MenuState> {
        let vault = self.ctx.vault.clone();

        if self.runtime.block_on(vault.exists()) {
            let Some(use_saved) = self.prompt.confirm("发现保存的账号信息，是否直接登录？")? else {
                return Ok(MenuState::Done);
            };
            if !use_saved {
                self.forget_credentials()?;
                return Ok(MenuState::Login);
            }
            match self.runtime.block_on(vault.load()) {
                Ok(credentials) => return self.sign_in(&credentials, false),
                Err(StudyError::Decryption(reason)) => {
                    warn!(%reason, "Saved credentials unreadable");
                    println!("保存的账号信息无法读取，请重新输入");
                    self.forget_credentials()?;
                }
                Err(err) => return Err(err.into()),
            }
        }

        let Some(account) = self.prompt.text("请输入账号：")? else {
            return Ok(MenuState::Done);
        };
        let Some(password) = self.prompt.password("请输入密码：")? else {
            return Ok(MenuState::Done);
        };
        self.sign_in(&Credentials::new(account, password), true)
    }

    fn sign_in(&mut self, credentials: &Credentials, offer_save: bool) -> Result<MenuState> {
        let session = self.runtime.block_on(self.ctx.sessions.login(credentials))?;
        println!("欢迎，{}", session.user_name);
        self.session = Some(session);

        if offer_save {
            let Some(save) = self.prompt.confirm("是否保存密码？")? else {
                return Ok(MenuState::Done);
            };
            if save {
                if let Err(err) = self.runtime.block_on(self.ctx.vault.save(credentials)) {
                    warn!(error = %err, "Saving credentials failed");
                    println!("保存密码失败：{err}");
                }
            }
        }
        Ok(MenuState::Main)
    }

    fn forget_credentials(&self) -> Result<()> {
        let path = self.ctx.vault.path();
        match std::fs::remove_file(path) {
            Ok(()) => {
                info!(path = %path.display(), "Saved credentials removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                let reason = format!("cannot remove {}: {err}", path.display());
                Err(StudyError::Storage(reason).into())
            }
        }
    }

    fn main_menu(&mut self) -> Result<MenuState> {
        let choices = labels(&MAIN_CHOICES);
        let Some(choice) = self.prompt.select("请选择一个操作:", &choices)? else {
            return Ok(MenuState::Done);
        };

        match choice {
            0 => {
                let numbers =
                    self.runtime.block_on(self.ctx.aggregator.org_numbers(self.session()?))?;
                render::print(&render::org_numbers(&numbers));
                Ok(MenuState::Main)
            }
            1 => {
                let detail =
                    self.runtime.block_on(self.ctx.aggregator.org_detail(self.session()?))?;
                render::print(&render::org_detail(&detail));
                Ok(MenuState::Main)
            }
            2 => Ok(MenuState::ClassPicker),
            _ => Ok(MenuState::Done),
        }
    }

    fn class_picker(&mut self) -> Result<MenuState> {
        let session = self.session()?.clone();
        let catalog = self.runtime.block_on(self.ctx.aggregator.classes(&session))?;
        if catalog.is_empty() {
            println!("暂无大学习期数");
            return Ok(MenuState::Main);
        }

        let choices = catalog.choice_labels();
        let Some(index) = self.prompt.select("请选择一个需要查询的期数:", &choices)? else {
            return Ok(MenuState::Done);
        };
        let Some(class) = catalog.get(index).cloned() else {
            return Ok(MenuState::Main);
        };

        render::print(&render::class_info(&class));
        let progress =
            self.runtime.block_on(self.ctx.aggregator.class_progress(&session, &class.id))?;
        render::print(&render::class_progress(&progress));

        Ok(MenuState::Exports { class })
    }

    fn exports(&mut self, class: ClassInfo) -> Result<MenuState> {
        let choices = labels(&STUDY_CHOICES);
        let Some(index) = self.prompt.select("请选择一个操作:", &choices)? else {
            return Ok(MenuState::Done);
        };
        let session = self.session()?.clone();
        let reports = &self.ctx.reports;

        let outcome = match ExportAction::from_index(index) {
            ExportAction::AllFinished => {
                self.runtime.block_on(reports.export_finished(&session, &class, None))?
            }
            ExportAction::AllUnfinished => {
                self.runtime.block_on(reports.export_unfinished(&session, &class, None))?
            }
            ExportAction::OrgSummary => {
                self.runtime.block_on(reports.export_org_summary(&session, &class))?
            }
            ExportAction::SubOrg(listing) => {
                return Ok(MenuState::SubOrgPicker { class, listing })
            }
            ExportAction::Back => return Ok(MenuState::Main),
        };

        println!("{}", render::export_outcome(&outcome));
        self.after_export(class)
    }

    fn sub_org_picker(&mut self, class: ClassInfo, listing: RecordListing) -> Result<MenuState> {
        let session = self.session()?.clone();
        let hierarchy =
            self.runtime.block_on(self.ctx.aggregator.org_hierarchy(&session, &class.id))?;

        let mut choices: Vec<String> = hierarchy.summaries().iter().map(|s| s.label()).collect();
        choices.push(BACK_TO_MAIN.to_string());

        let Some(index) = self.prompt.select("请选择一个需要查询的团支部:", &choices)? else {
            return Ok(MenuState::Done);
        };
        let Some(org) = hierarchy.summaries().get(index) else {
            return Ok(MenuState::Main);
        };

        let reports = &self.ctx.reports;
        let outcome = match listing {
            RecordListing::Finished => {
                self.runtime.block_on(reports.export_finished(&session, &class, Some(org)))?
            }
            RecordListing::Unfinished => {
                self.runtime.block_on(reports.export_unfinished(&session, &class, Some(org)))?
            }
        };

        println!("{}", render::export_outcome(&outcome));
        self.after_export(class)
    }

    fn after_export(&mut self, class: ClassInfo) -> Result<MenuState> {
        match self.prompt.confirm("导出成功！是否返回主菜单？")? {
            Some(true) => Ok(MenuState::Main),
            Some(false) => Ok(MenuState::Exports { class }),
            None => Ok(MenuState::Done),
        }
    }
}

fn labels(choices: &[&str]) -> Vec<String> {
    choices.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_actions_follow_menu_order() {
        assert_eq!(ExportAction::from_index(0), ExportAction::AllFinished);
        assert_eq!(ExportAction::from_index(1), ExportAction::AllUnfinished);
        assert_eq!(ExportAction::from_index(2), ExportAction::SubOrg(RecordListing::Finished));
        assert_eq!(ExportAction::from_index(3), ExportAction::SubOrg(RecordListing::Unfinished));
        assert_eq!(ExportAction::from_index(4), ExportAction::OrgSummary);
        assert_eq!(ExportAction::from_index(5), ExportAction::Back);
        assert_eq!(STUDY_CHOICES[5], BACK_TO_MAIN);
    }

    #[test]
    fn leaving_entries_are_last_on_main_menu() {
        assert_eq!(MAIN_CHOICES[3], "完成大学习");
        assert_eq!(MAIN_CHOICES[4], "退出");
        assert_eq!(labels(&MAIN_CHOICES).len(), 5);
    }
}
