use std::io::Write;

use tempfile::NamedTempFile;

pub const FULL_HEADER: &str = "hover_label,On_Sale_Date,List_Price,qual_score,avg_annual_units,\
Page_Count,Title_Age,amazonaveragerating,amazontotalreviews,2024_units,2025_units,\
Suggested Position Category";

/// Write `text` to a temporary `.csv` file that lives as long as the handle.
pub fn csv_file(text: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(text.as_bytes())
        .expect("Failed to write temp file");
    file
}

/// Three titles where the last one is the reference scenario:
/// `List_Price=50, qual_score=8, avg_annual_units=15000, hover_label="Ref Book"`.
pub fn three_row_csv() -> String {
    format!(
        "{FULL_HEADER}\n\
         Alpha,2021-05-01,12.99,6.5,20000,320,4,4.4,1234,21000,9000,Core\n\
         Beta,not-a-date,24.5,7.25,4000,210,2,4.1,87,3900,2500,Niche\n\
         Ref Book,2019-09-09,50,8,15000,,,,,,,\n"
    )
}
