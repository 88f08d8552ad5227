//! Load batches of investment requests from CSV

use super::{AmountInput, InvestmentKind, InvestmentRequest};
use crate::error::RequestLoadError;
use csv::Reader;
use std::path::Path;

/// Raw CSV row: ProductId,TermDays,Amount,InvestmentKind,RunMonths
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ProductId")]
    product_id: String,
    #[serde(rename = "TermDays")]
    term_days: i64,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "InvestmentKind")]
    investment_kind: String,
    #[serde(rename = "RunMonths")]
    run_months: Option<i64>,
}

impl CsvRow {
    fn to_request(self) -> Result<InvestmentRequest, RequestLoadError> {
        let investment_kind = InvestmentKind::parse(&self.investment_kind)
            .ok_or_else(|| RequestLoadError::UnknownKind(self.investment_kind.clone()))?;

        Ok(InvestmentRequest {
            product_id: self.product_id,
            term_days: self.term_days,
            // Left unparsed so the validator reports non-numeric amounts
            amount: AmountInput::Text(self.amount),
            investment_kind,
            run_months: self.run_months,
        })
    }
}

/// Load requests from any reader
pub fn load_requests_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<InvestmentRequest>, RequestLoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut requests = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    Ok(requests)
}

/// Load requests from a CSV file
pub fn load_requests<P: AsRef<Path>>(path: P) -> Result<Vec<InvestmentRequest>, RequestLoadError> {
    let mut reader = Reader::from_path(path)?;
    let mut requests = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        requests.push(row.to_request()?);
    }

    Ok(requests)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_requests_from_reader() {
        let data = "ProductId,TermDays,Amount,InvestmentKind,RunMonths\n\
                    cetes,28,10000,single,\n\
                    nu,90,500,recurring,24\n";
        let requests = load_requests_from_reader(data.as_bytes()).unwrap();
        assert_eq!(requests.len(), 2);

        assert_eq!(requests[0].investment_kind, InvestmentKind::Single);
        assert_eq!(requests[0].run_months, None);
        assert_eq!(requests[0].amount.parse(), Some(10000.0));

        assert_eq!(requests[1].investment_kind, InvestmentKind::Recurring);
        assert_eq!(requests[1].run_months, Some(24));
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let data = "ProductId,TermDays,Amount,InvestmentKind,RunMonths\ncetes,28,100,weekly,\n";
        let err = load_requests_from_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, RequestLoadError::UnknownKind(k) if k == "weekly"));
    }

    #[test]
    fn test_load_sample_requests() {
        let requests = load_requests("data/sample_requests.csv").expect("Failed to load requests");
        assert_eq!(requests.len(), 6);
        assert_eq!(requests[2].product_id, "nu");
    }
}
