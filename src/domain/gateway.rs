use crate::error::{LifecycleError, Result};
use serde::{Deserialize, Serialize};

/// External settlement provider handling a payment.
///
/// Each gateway carries a stable lowercase code used for lookups from
/// configuration and event streams. The mapping is closed: resolving a code
/// outside the table is an error, never a default.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum PaymentGateway {
    Mock,
    Alipay,
    WechatPay,
    Unionpay,
}

impl PaymentGateway {
    pub const ALL: [PaymentGateway; 4] = [
        PaymentGateway::Mock,
        PaymentGateway::Alipay,
        PaymentGateway::WechatPay,
        PaymentGateway::Unionpay,
    ];

    /// The stable lowercase code identifying this gateway externally.
    pub fn code(self) -> &'static str {
        match self {
            PaymentGateway::Mock => "mock",
            PaymentGateway::Alipay => "alipay",
            PaymentGateway::WechatPay => "wechat_pay",
            PaymentGateway::Unionpay => "unionpay",
        }
    }

    /// Resolves a gateway from its code, ignoring case and surrounding
    /// whitespace.
    pub fn from_code(code: &str) -> Result<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|gateway| gateway.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| LifecycleError::UnknownGateway(code.to_string()))
    }

    /// True for the development/test gateway that has no real settlement
    /// behind it.
    pub fn is_mock(self) -> bool {
        self == PaymentGateway::Mock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_round_trip() {
        for gateway in PaymentGateway::ALL {
            assert_eq!(PaymentGateway::from_code(gateway.code()).unwrap(), gateway);
        }
    }

    #[test]
    fn test_from_code_is_case_insensitive() {
        for gateway in PaymentGateway::ALL {
            let upper = gateway.code().to_uppercase();
            assert_eq!(PaymentGateway::from_code(&upper).unwrap(), gateway);
        }
        assert_eq!(
            PaymentGateway::from_code(" WeChat_Pay ").unwrap(),
            PaymentGateway::WechatPay
        );
    }

    #[test]
    fn test_unknown_code_is_rejected() {
        assert!(matches!(
            PaymentGateway::from_code("bogus"),
            Err(LifecycleError::UnknownGateway(_))
        ));
        assert!(matches!(
            PaymentGateway::from_code(""),
            Err(LifecycleError::UnknownGateway(_))
        ));
        assert!(matches!(
            PaymentGateway::from_code("   "),
            Err(LifecycleError::UnknownGateway(_))
        ));
    }

    #[test]
    fn test_is_mock() {
        assert!(PaymentGateway::Mock.is_mock());
        assert!(!PaymentGateway::Alipay.is_mock());
        assert!(!PaymentGateway::WechatPay.is_mock());
        assert!(!PaymentGateway::Unionpay.is_mock());
    }
}
