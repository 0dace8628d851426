use rebate_types::{AccountId, AuditEvent, RebateError, Result, Role};
use serde::{Deserialize, Serialize};

/// Current holders of the three privileged roles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roles {
    pub owner: AccountId,
    pub operator: AccountId,
    pub payer: AccountId,
}

impl Roles {
    pub fn new(
        owner: impl Into<AccountId>,
        operator: impl Into<AccountId>,
        payer: impl Into<AccountId>,
    ) -> Self {
        Roles {
            owner: owner.into(),
            operator: operator.into(),
            payer: payer.into(),
        }
    }
}

/// Sole writer of role identities
///
/// One active holder per role; reassignment replaces the holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRegistry {
    roles: Roles,
}

impl RoleRegistry {
    pub fn new(roles: Roles) -> Self {
        RoleRegistry { roles }
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn holder(&self, role: Role) -> &AccountId {
        match role {
            Role::Owner => &self.roles.owner,
            Role::Operator => &self.roles.operator,
            Role::Payer => &self.roles.payer,
        }
    }

    /// Pure predicate: does `caller` hold `role`
    pub fn authorize(&self, caller: &AccountId, role: Role) -> bool {
        self.holder(role) == caller
    }

    pub fn ensure(&self, caller: &AccountId, role: Role) -> Result<()> {
        if self.authorize(caller, role) {
            Ok(())
        } else {
            Err(RebateError::Unauthorized {
                caller: caller.clone(),
                role,
            })
        }
    }

    /// Owner-only: replace the operator
    pub fn assign_operator(&mut self, caller: &AccountId, operator: AccountId) -> Result<AuditEvent> {
        self.ensure(caller, Role::Owner)?;
        self.roles.operator = operator.clone();
        Ok(AuditEvent::OperatorAssigned { operator })
    }

    /// Owner-only: replace the payer
    pub fn assign_payer(&mut self, caller: &AccountId, payer: AccountId) -> Result<AuditEvent> {
        self.ensure(caller, Role::Owner)?;
        self.roles.payer = payer.clone();
        Ok(AuditEvent::PayerAssigned { payer })
    }
}
