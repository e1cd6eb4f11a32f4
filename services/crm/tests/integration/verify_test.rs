use kontor_crm::error::CrmServiceError;
use kontor_crm::usecase::login::{LoginInput, PasswordLoginUseCase};
use kontor_crm::usecase::register::{RegisterInput, RegisterUseCase};
use kontor_crm::usecase::verify::{VerifyLoginInput, VerifyLoginUseCase};

use crate::helpers::{MockLoginCodeRepo, MockMailer, MockUserRepo, login_code_for, user_with_password};

fn verify_input(user_id: uuid::Uuid, code: &str) -> VerifyLoginInput {
    VerifyLoginInput {
        user_id,
        code: code.to_owned(),
    }
}

#[tokio::test]
async fn should_authenticate_with_correct_code_and_consume_it() {
    let user = user_with_password("user@example.com", "secret1");
    let codes_repo = MockLoginCodeRepo::new(vec![login_code_for(user.id, "00042", 300)]);
    let codes = codes_repo.codes_handle();

    let uc = VerifyLoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        login_codes: codes_repo,
    };

    let verified = uc.execute(verify_input(user.id, "00042")).await.unwrap();
    assert_eq!(verified.id, user.id);
    assert!(codes.lock().unwrap().is_empty(), "code is single use");
}

#[tokio::test]
async fn should_reject_replay_of_consumed_code() {
    let user = user_with_password("user@example.com", "secret1");
    let codes_repo = MockLoginCodeRepo::new(vec![login_code_for(user.id, "00042", 300)]);

    let uc = VerifyLoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        login_codes: codes_repo,
    };

    uc.execute(verify_input(user.id, "00042")).await.unwrap();
    let replay = uc.execute(verify_input(user.id, "00042")).await;

    assert!(matches!(replay, Err(CrmServiceError::InvalidLoginCode)));
}

#[tokio::test]
async fn should_reject_wrong_code_and_keep_the_issued_one() {
    let user = user_with_password("user@example.com", "secret1");
    let codes_repo = MockLoginCodeRepo::new(vec![login_code_for(user.id, "00042", 300)]);
    let codes = codes_repo.codes_handle();

    let uc = VerifyLoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        login_codes: codes_repo,
    };

    let result = uc.execute(verify_input(user.id, "11111")).await;

    assert!(matches!(result, Err(CrmServiceError::InvalidLoginCode)));
    assert_eq!(
        codes.lock().unwrap().len(),
        1,
        "a failed attempt leaves the issued code usable"
    );
}

#[tokio::test]
async fn should_reject_expired_code() {
    let user = user_with_password("user@example.com", "secret1");
    let codes_repo = MockLoginCodeRepo::new(vec![login_code_for(user.id, "00042", -1)]);

    let uc = VerifyLoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        login_codes: codes_repo,
    };

    let result = uc.execute(verify_input(user.id, "00042")).await;

    assert!(matches!(result, Err(CrmServiceError::InvalidLoginCode)));
}

#[tokio::test]
async fn should_compare_codes_as_strings_preserving_leading_zeros() {
    let user = user_with_password("user@example.com", "secret1");
    let codes_repo = MockLoginCodeRepo::new(vec![login_code_for(user.id, "00042", 300)]);

    let uc = VerifyLoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        login_codes: codes_repo,
    };

    let numeric = uc.execute(verify_input(user.id, "42")).await;
    assert!(
        matches!(numeric, Err(CrmServiceError::InvalidLoginCode)),
        "\"42\" must not match \"00042\""
    );

    let exact = uc.execute(verify_input(user.id, "00042")).await;
    assert!(exact.is_ok());
}

#[tokio::test]
async fn should_trim_submitted_code() {
    let user = user_with_password("user@example.com", "secret1");
    let codes_repo = MockLoginCodeRepo::new(vec![login_code_for(user.id, "00042", 300)]);

    let uc = VerifyLoginUseCase {
        users: MockUserRepo::new(vec![user.clone()]),
        login_codes: codes_repo,
    };

    let result = uc.execute(verify_input(user.id, " 00042 ")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn should_reject_verification_for_unknown_user() {
    let uc = VerifyLoginUseCase {
        users: MockUserRepo::empty(),
        login_codes: MockLoginCodeRepo::empty(),
    };

    let result = uc.execute(verify_input(uuid::Uuid::now_v7(), "00042")).await;

    assert!(matches!(result, Err(CrmServiceError::SessionExpired)));
}

/// The end-to-end login story: register, pass the password check, fail with a
/// wrong code, succeed with the issued one, and fail to replay it.
#[tokio::test]
async fn should_complete_two_factor_login_scenario() {
    let users = MockUserRepo::empty();
    let users_handle = users.users_handle();

    // Register
    let register = RegisterUseCase { users };
    register
        .execute(RegisterInput {
            email: "user@example.com".to_owned(),
            password: "secret1".to_owned(),
            confirm: "secret1".to_owned(),
        })
        .await
        .unwrap();

    // Login with correct credentials → a 5-digit code is issued
    let codes_repo = MockLoginCodeRepo::empty();
    let codes_handle = codes_repo.codes_handle();
    let login = PasswordLoginUseCase {
        users: MockUserRepo {
            users: users_handle.clone(),
        },
        login_codes: codes_repo,
        mailer: MockMailer::working(),
    };
    let pending = login
        .execute(LoginInput {
            email: "user@example.com".to_owned(),
            password: "secret1".to_owned(),
            next: None,
        })
        .await
        .unwrap();

    let issued = {
        let codes = codes_handle.lock().unwrap();
        assert_eq!(codes.len(), 1);
        assert_eq!(codes[0].code.len(), 5);
        codes[0].code.clone()
    };

    let verify = VerifyLoginUseCase {
        users: MockUserRepo {
            users: users_handle.clone(),
        },
        login_codes: MockLoginCodeRepo {
            codes: codes_handle.clone(),
        },
    };

    // A wrong code leaves the session pending and unauthenticated
    let wrong = if issued == "00000" { "00001" } else { "00000" };
    let failed = verify.execute(verify_input(pending.user_id, wrong)).await;
    assert!(matches!(failed, Err(CrmServiceError::InvalidLoginCode)));
    assert_eq!(codes_handle.lock().unwrap().len(), 1);

    // The correct code authenticates
    let user = verify
        .execute(verify_input(pending.user_id, &issued))
        .await
        .unwrap();
    assert_eq!(user.email, "user@example.com");

    // The consumed code cannot be reused
    let replay = verify.execute(verify_input(pending.user_id, &issued)).await;
    assert!(matches!(replay, Err(CrmServiceError::InvalidLoginCode)));
}
