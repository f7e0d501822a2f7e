use chart_analysis::config::AnalysisConfig;
use chart_analysis::config_loader::{ConfigFormat, ConfigLoader};
use log::{debug, error, info};
use std::env;
use std::path::PathBuf;

fn main() {
    // 로그 초기화
    env_logger::init();

    info!("분석 설정 로더 시작");

    let args: Vec<String> = env::args().collect();
    debug!("커맨드 라인 인수: {:?}", args);

    if args.len() < 2 {
        println!("사용법: {} <설정_파일_경로>", args[0]);
        println!("       {} --init <설정_파일_경로>  (기본 설정 파일 생성)", args[0]);
        return;
    }

    // --init: 기본 설정을 파일로 저장
    if args[1] == "--init" {
        let Some(path) = args.get(2) else {
            error!("--init에는 저장할 파일 경로가 필요합니다");
            println!("사용법: {} --init <설정_파일_경로>", args[0]);
            return;
        };
        let path = PathBuf::from(path);

        match ConfigLoader::save_to_file(&AnalysisConfig::default(), &path, ConfigFormat::Auto) {
            Ok(()) => {
                info!("기본 설정 파일 생성 완료: {}", path.display());
                println!("기본 설정 파일 생성 완료: {}", path.display());
            }
            Err(err) => {
                error!("기본 설정 파일 생성 실패: {}", err);
                println!("기본 설정 파일 생성 실패: {}", err);
            }
        }
        return;
    }

    let config_path = PathBuf::from(&args[1]);
    if !config_path.exists() {
        error!("설정 파일이 존재하지 않습니다: {}", config_path.display());
        println!("설정 파일이 존재하지 않습니다: {}", config_path.display());
        return;
    }

    info!("설정 파일: {}", config_path.display());

    match ConfigLoader::load_from_file::<AnalysisConfig>(&config_path, ConfigFormat::Auto) {
        Ok(config) => {
            info!("설정 로드 성공");
            println!("설정 로드 성공:");
            println!("{:#?}", config);
        }
        Err(err) => {
            error!("설정 로드 실패: {}", err);
            println!("설정 로드 실패: {}", err);

            // 오류 종류에 따라 해결 방법 안내
            if err.to_string().contains("파싱") {
                println!("해결 방법: 설정 파일 형식(TOML/JSON)이 올바른지 확인하세요.");
            } else if err.to_string().contains("유효성") {
                println!("해결 방법: 설정 값이 유효 범위 내에 있는지 확인하세요.");
            }
        }
    }

    info!("분석 설정 로더 종료");
}
