// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 GhostQuest

//! Builders for the game's on-chain actions.
//!
//! Each operation submits exactly one action. Player-funded operations ride
//! on a token transfer to the service account with a tagged memo directive;
//! game-server-driven events call the game contract directly under the
//! service identity. No chain-side validation happens here; a bad username
//! or payload surfaces when the chain executes the action.

use serde_json::{json, Value};

use super::types::{Action, PermissionLevel, TransferMemo};

/// System token contract handling currency transfers.
pub const TOKEN_CONTRACT: &str = "eosio.token";

/// On-chain identity of the game service itself.
pub const SERVICE_ACCOUNT: &str = "ghostquest";

fn token_transfer(from: &str, quantity: String, memo: TransferMemo) -> Action {
    Action {
        account: TOKEN_CONTRACT.to_string(),
        name: "transfer".to_string(),
        authorization: vec![PermissionLevel::active(from)],
        data: json!({
            "from": from,
            "to": SERVICE_ACCOUNT,
            "quantity": quantity,
            "memo": memo.to_string(),
        }),
    }
}

/// Character generation: the player funds the character with a whole-EOS
/// amount and encodes the battle limit in the memo.
pub fn generate_character(username: &str, amount: &str, battle_limit: &str) -> Action {
    token_transfer(
        username,
        format!("{amount}.0000 EOS"),
        TransferMemo::BattleLimit(battle_limit.to_string()),
    )
}

/// Life top-up: fixed price of one EOS, ghost named in the memo.
pub fn add_life(username: &str, ghost_id: &str) -> Action {
    token_transfer(
        username,
        "1.0000 EOS".to_string(),
        TransferMemo::AddLife(ghost_id.to_string()),
    )
}

/// Elimination of a ghost, driven by the game server and therefore
/// authorized by the service identity rather than the player.
pub fn eliminate(contract: &str, username: Value, ghost_id: Value) -> Action {
    Action {
        account: contract.to_string(),
        name: "eliminate".to_string(),
        authorization: vec![PermissionLevel::active(SERVICE_ACCOUNT)],
        data: json!({
            "username": username,
            "key": ghost_id,
        }),
    }
}

/// Battle outcome recorded by the game server under the service identity.
pub fn battle_result(contract: &str, gameid: Value, winner: Value, loser: Value) -> Action {
    Action {
        account: contract.to_string(),
        name: "battleresult".to_string(),
        authorization: vec![PermissionLevel::active(SERVICE_ACCOUNT)],
        data: json!({
            "gameid": gameid,
            "winner": winner,
            "loser": loser,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_formats_quantity_and_memo() {
        let action = generate_character("alice", "5", "3");
        assert_eq!(action.account, "eosio.token");
        assert_eq!(action.name, "transfer");
        assert_eq!(action.authorization, vec![PermissionLevel::active("alice")]);
        assert_eq!(action.data["from"], "alice");
        assert_eq!(action.data["to"], "ghostquest");
        assert_eq!(action.data["quantity"], "5.0000 EOS");
        assert_eq!(action.data["memo"], "BTTL_LMT=3");
    }

    #[test]
    fn add_life_uses_fixed_quantity() {
        let action = add_life("bob", "g1");
        assert_eq!(action.data["quantity"], "1.0000 EOS");
        assert_eq!(action.data["memo"], "ADD_LIFE=g1");
        assert_eq!(action.authorization, vec![PermissionLevel::active("bob")]);
    }

    #[test]
    fn eliminate_is_authorized_by_the_service() {
        let action = eliminate("gqgamecontra", json!("alice"), json!(42));
        assert_eq!(action.account, "gqgamecontra");
        assert_eq!(action.name, "eliminate");
        assert_eq!(
            action.authorization,
            vec![PermissionLevel::active(SERVICE_ACCOUNT)]
        );
        assert_eq!(action.data["username"], "alice");
        assert_eq!(action.data["key"], 42);
    }

    #[test]
    fn battle_result_is_authorized_by_the_service() {
        let action = battle_result("gqgamecontra", json!(7), json!("alice"), json!("bob"));
        assert_eq!(action.name, "battleresult");
        assert_eq!(
            action.authorization,
            vec![PermissionLevel::active(SERVICE_ACCOUNT)]
        );
        assert_eq!(action.data["gameid"], 7);
        assert_eq!(action.data["winner"], "alice");
        assert_eq!(action.data["loser"], "bob");
    }
}
