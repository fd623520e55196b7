use crate::error::ServiceError;
use crate::schema::RawSecurity;
use crate::service::WealthService;
use log::debug;
use std::collections::HashMap;

/// What one security lookup produced
#[derive(Debug, Clone, PartialEq)]
enum Lookup {
    Found {
        symbol: Option<String>,
        name: Option<String>,
    },
    Missing,
    Failed,
}

/// Resolves security ids to display names, asking the service at most once per id.
///
/// A failed lookup is remembered as failed and never aborts the caller.
pub struct SecurityResolver<'a> {
    service: &'a dyn WealthService,
    cache: HashMap<String, Lookup>,
}

impl<'a> SecurityResolver<'a> {
    pub fn new(service: &'a dyn WealthService) -> Self {
        Self {
            service,
            cache: HashMap::new(),
        }
    }

    /// Name used inside activity descriptions: symbol, else name, else the id itself
    pub fn display_name(&mut self, security_id: &str) -> String {
        match self.lookup(security_id) {
            Lookup::Found { symbol, name } => symbol
                .or(name)
                .unwrap_or_else(|| security_id.to_string()),
            Lookup::Missing | Lookup::Failed => security_id.to_string(),
        }
    }

    /// `(symbol, name)` for a position row
    pub fn symbol_and_name(&mut self, security_id: Option<&str>) -> (String, String) {
        let Some(security_id) = security_id else {
            return ("N/A".to_string(), "Unknown".to_string());
        };
        match self.lookup(security_id) {
            Lookup::Found { symbol, name } => {
                let symbol = symbol.unwrap_or_else(|| "N/A".to_string());
                let name = name.unwrap_or_else(|| symbol.clone());
                (symbol, name)
            }
            Lookup::Missing => ("N/A".to_string(), "Unknown".to_string()),
            Lookup::Failed => (security_id.to_string(), security_id.to_string()),
        }
    }

    fn lookup(&mut self, security_id: &str) -> Lookup {
        if let Some(cached) = self.cache.get(security_id) {
            return cached.clone();
        }
        let outcome = classify(security_id, self.service.security(security_id));
        self.cache.insert(security_id.to_string(), outcome.clone());
        outcome
    }
}

fn classify(security_id: &str, result: Result<Option<RawSecurity>, ServiceError>) -> Lookup {
    match result {
        Ok(Some(RawSecurity {
            stock: Some(stock), ..
        })) => Lookup::Found {
            symbol: stock.symbol.filter(|s| !s.is_empty()),
            name: stock.name.filter(|s| !s.is_empty()),
        },
        Ok(_) => Lookup::Missing,
        Err(e) => {
            debug!("security lookup failed for {}: {}", security_id, e);
            Lookup::Failed
        }
    }
}
