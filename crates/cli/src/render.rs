//! Text shown after each query

use studyreport_core::ExportOutcome;
use studyreport_domain::{ClassInfo, ClassProgress, OrgDetail, OrgNumbers};

pub fn org_numbers(numbers: &OrgNumbers) -> Vec<String> {
    vec![
        format!("团员数: {}", numbers.members),
        format!("团干数: {}", numbers.cadre),
        format!("团支部数: {}", numbers.org_num),
    ]
}

pub fn org_detail(detail: &OrgDetail) -> Vec<String> {
    vec![
        format!("上级组织名称: {}", detail.parent_id_name),
        format!("组织名称: {}", detail.org_name),
        format!("组织团员数: {}", detail.num),
    ]
}

pub fn class_info(class: &ClassInfo) -> Vec<String> {
    vec![
        format!("大学习名称: {}:{}", class.title, class.theme),
        format!("大学习开始时间: {}", class.start_time),
        format!("大学习结束时间: {}", class.end_time),
        format!("大学习链接: {}", class.url),
    ]
}

pub fn class_progress(progress: &ClassProgress) -> Vec<String> {
    vec![
        format!("大学习标题: {}", progress.title),
        format!("大学习总人数: {}", progress.all_num),
        format!("大学习已完成人数: {}", progress.num),
        format!("大学习完成率: {}%", progress.occupancy),
    ]
}

pub fn export_outcome(outcome: &ExportOutcome) -> String {
    format!("已导出 {} 条记录到 {}", outcome.rows, outcome.path.display())
}

pub fn print(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn class_info_joins_title_and_theme() {
        let class = ClassInfo {
            title: "第一期".into(),
            theme: "主题".into(),
            url: "https://example.test/1".into(),
            ..Default::default()
        };
        let lines = class_info(&class);
        assert_eq!(lines[0], "大学习名称: 第一期:主题");
        assert_eq!(lines[3], "大学习链接: https://example.test/1");
    }

    #[test]
    fn progress_rate_has_percent_sign() {
        let progress = ClassProgress { occupancy: 87.5, all_num: 40, num: 35, ..Default::default() };
        assert_eq!(class_progress(&progress)[3], "大学习完成率: 87.5%");
    }

    #[test]
    fn numbers_and_detail_use_service_labels() {
        let numbers = OrgNumbers { members: 30, cadre: 3, org_num: 2 };
        assert_eq!(org_numbers(&numbers), vec!["团员数: 30", "团干数: 3", "团支部数: 2"]);

        let detail =
            OrgDetail { parent_id_name: "学院".into(), org_name: "一班".into(), num: 40 };
        assert_eq!(org_detail(&detail)[1], "组织名称: 一班");
    }

    #[test]
    fn outcome_mentions_rows_and_path() {
        let outcome = ExportOutcome { path: PathBuf::from("导出/a.json"), rows: 12 };
        assert_eq!(export_outcome(&outcome), "已导出 12 条记录到 导出/a.json");
    }
}
