use assert_fs::TempDir;
use predicates::prelude::*;
use rstest::rstest;

mod common;

use common::command::{init_repository_dir, lit_commit, run_lit_command};
use common::file::{FileSpec, read_file, write_file};
use common::repo;

/// Base commit with `left.txt` and `right.txt`, plus a `feature` branch
/// still sitting at that commit
fn base_with_feature_branch(dir: &TempDir) {
    write_file(FileSpec::new(dir.path().join("left.txt"), "base\n".to_string()));
    write_file(FileSpec::new(dir.path().join("right.txt"), "base\n".to_string()));
    run_lit_command(dir.path(), &["add", "left.txt"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["add", "right.txt"])
        .assert()
        .success();
    lit_commit(dir.path(), "base").assert().success();

    run_lit_command(dir.path(), &["branch", "feature"])
        .assert()
        .success();
}

fn commit_file(dir: &TempDir, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.path().join(name), content.to_string()));
    run_lit_command(dir.path(), &["add", name]).assert().success();
    lit_commit(dir.path(), message).assert().success();
}

#[rstest]
fn merging_a_strictly_ahead_branch_fast_forwards(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    base_with_feature_branch(&dir);

    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(&dir, "right.txt", "feature change\n", "feature work");

    run_lit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    let objects_before = repo::count_objects(dir.path());

    run_lit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current branch fast-forwarded."));

    // pointer moved, no merge commit created
    assert_eq!(
        repo::head_oid(dir.path()),
        repo::branch_oid(dir.path(), "feature")
    );
    assert_eq!(repo::count_objects(dir.path()), objects_before);
    assert_eq!(read_file(dir.path().join("right.txt")), "feature change\n");
}

#[rstest]
fn merging_an_ancestor_branch_changes_nothing(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    base_with_feature_branch(&dir);

    commit_file(&dir, "left.txt", "master change\n", "master work");
    let head_before = repo::head_oid(dir.path());

    run_lit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Given branch is an ancestor of the current branch.",
        ));

    assert_eq!(repo::head_oid(dir.path()), head_before);
}

#[rstest]
fn diverged_branches_merge_into_a_two_parent_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    base_with_feature_branch(&dir);

    commit_file(&dir, "left.txt", "master change\n", "master work");
    let master_tip = repo::head_oid(dir.path());

    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(&dir, "right.txt", "feature change\n", "feature work");
    let feature_tip = repo::head_oid(dir.path());

    run_lit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict.").not());

    let merge_commit = repo::read_commit(dir.path(), &repo::head_oid(dir.path()));
    assert_eq!(merge_commit.parents, vec![master_tip, feature_tip]);
    assert_eq!(merge_commit.message, "Merged feature into master.");

    // both sides' changes are present
    assert_eq!(read_file(dir.path().join("left.txt")), "master change\n");
    assert_eq!(read_file(dir.path().join("right.txt")), "feature change\n");
    assert_eq!(repo::index_content(dir.path()), "");
}

#[rstest]
fn divergent_edits_to_one_file_produce_a_conflicted_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    base_with_feature_branch(&dir);

    commit_file(&dir, "left.txt", "master version\n", "master work");

    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(&dir, "left.txt", "feature version\n", "feature work");

    run_lit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    // the merge still completed with both parents recorded
    let merge_commit = repo::read_commit(dir.path(), &repo::head_oid(dir.path()));
    assert_eq!(merge_commit.parents.len(), 2);

    let expected = "<<<<<<< HEAD\nmaster version\n=======\nfeature version\n>>>>>>>\n";
    assert_eq!(read_file(dir.path().join("left.txt")), expected);
    // the conflicted content is what got committed
    assert_eq!(merge_commit.tree["left.txt"], repo::blob_digest(expected));
}

#[rstest]
fn a_deletion_conflicting_with_an_edit_keeps_both_sides(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    base_with_feature_branch(&dir);

    commit_file(&dir, "left.txt", "master version\n", "master work");

    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["rm", "left.txt"])
        .assert()
        .success();
    lit_commit(dir.path(), "drop left").assert().success();

    run_lit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    run_lit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Encountered a merge conflict."));

    // the deleted side contributes nothing between the markers
    let expected = "<<<<<<< HEAD\nmaster version\n=======\n>>>>>>>\n";
    assert_eq!(read_file(dir.path().join("left.txt")), expected);
}

#[rstest]
fn merging_with_staged_changes_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    base_with_feature_branch(&dir);

    write_file(FileSpec::new(dir.path().join("new.txt"), "new\n".to_string()));
    run_lit_command(dir.path(), &["add", "new.txt"])
        .assert()
        .success();

    run_lit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains("You have uncommitted changes."));
}

#[rstest]
#[case::unknown_name("ghost")]
#[case::name_that_could_never_be_created("foo..bar")]
fn merging_an_unknown_branch_is_refused(init_repository_dir: TempDir, #[case] name: &str) {
    let dir = init_repository_dir;

    run_lit_command(dir.path(), &["merge", name])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "A branch with that name does not exist.",
        ));
}

#[rstest]
fn merging_a_branch_with_itself_is_refused(init_repository_dir: TempDir) {
    let dir = init_repository_dir;

    run_lit_command(dir.path(), &["merge", "master"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cannot merge a branch with itself."));
}

#[rstest]
fn an_untracked_file_the_merge_would_overwrite_blocks_it(init_repository_dir: TempDir) {
    let dir = init_repository_dir;
    base_with_feature_branch(&dir);

    commit_file(&dir, "left.txt", "master change\n", "master work");

    run_lit_command(dir.path(), &["checkout", "feature"])
        .assert()
        .success();
    commit_file(&dir, "incoming.txt", "from feature\n", "feature work");

    run_lit_command(dir.path(), &["checkout", "master"])
        .assert()
        .success();
    // same name as a file the other branch would bring in
    write_file(FileSpec::new(
        dir.path().join("incoming.txt"),
        "precious local data\n".to_string(),
    ));

    run_lit_command(dir.path(), &["merge", "feature"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "There is an untracked file in the way; delete it, or add and commit it first.",
        ));

    assert_eq!(
        read_file(dir.path().join("incoming.txt")),
        "precious local data\n"
    );
}
